// src/error.rs

use thiserror::Error;

/// Failure taxonomy for the deployment pipeline. Every variant is fatal:
/// the pipeline never retries, and the process exits non-zero.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("no signing identity available from the chain client")]
    NoSignerAvailable,

    /// The chain client refused the creation transaction synchronously
    /// (malformed arguments, artifact problems, insufficient funds known
    /// upfront).
    #[error("deployment submission rejected: {0}")]
    SubmissionRejected(String),

    /// The creation transaction was accepted but never reached successful
    /// finality: dropped, reverted, or the wait itself failed.
    #[error("deployment confirmation failed: {0}")]
    ConfirmationFailed(String),
}
