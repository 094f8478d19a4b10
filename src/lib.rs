// src/lib.rs

// Re-export modules needed by integration tests and the binary.
pub mod artifact;
pub mod client;
pub mod config;
pub mod deploy;
pub mod error;

// Public types re-exported for convenience
pub use client::{ChainClient, ConfirmedDeployment, EthersClient, PendingDeployment};
pub use config::{load_config, Config};
pub use deploy::{report_line, ConstructorParams};
pub use error::DeployError;
