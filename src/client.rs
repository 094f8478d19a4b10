// src/client.rs

use async_trait::async_trait;
use ethers::{
    contract::ContractFactory,
    middleware::SignerMiddleware,
    providers::{Http, Middleware, PendingTransaction, Provider},
    signers::LocalWallet,
    types::{Address, TxHash, U64},
    utils::get_contract_address,
};
use std::{path::PathBuf, sync::Arc, time::Duration};
use tokio::time::timeout;
use tracing::{debug, info};

use crate::artifact;
use crate::deploy::ConstructorParams;
use crate::error::DeployError;

pub type HttpClient = Arc<SignerMiddleware<Provider<Http>, LocalWallet>>;

/// Handle returned once the creation transaction is accepted into the
/// client's pending pool. Not confirmed yet; the address is the
/// deterministic CREATE address for (sender, nonce).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingDeployment {
    pub address: Address,
    pub tx_hash: TxHash,
}

/// A pending handle upgraded with inclusion facts after a successful receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmedDeployment {
    pub address: Address,
    pub tx_hash: TxHash,
    pub block_number: Option<U64>,
}

/// The chain-side collaborator the orchestrator drives. One production
/// implementation over ethers; tests substitute their own.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Signing identities this client can submit with, in preference order.
    async fn list_signers(&self) -> Result<Vec<Address>, DeployError>;

    /// Broadcasts a contract-creation transaction. Returns as soon as the
    /// transaction is accepted into the pending pool.
    async fn deploy_contract(
        &self,
        identifier: &str,
        params: ConstructorParams,
    ) -> Result<PendingDeployment, DeployError>;

    /// Suspends until the creation transaction is included with status 1, or
    /// fails with `ConfirmationFailed`.
    async fn wait_for_confirmation(
        &self,
        pending: PendingDeployment,
    ) -> Result<ConfirmedDeployment, DeployError>;
}

pub struct EthersClient {
    inner: HttpClient,
    artifacts_dir: PathBuf,
    confirmation_timeout: Duration,
}

impl EthersClient {
    pub fn new(inner: HttpClient, artifacts_dir: PathBuf, confirmation_timeout: Duration) -> Self {
        Self {
            inner,
            artifacts_dir,
            confirmation_timeout,
        }
    }
}

#[async_trait]
impl ChainClient for EthersClient {
    async fn list_signers(&self) -> Result<Vec<Address>, DeployError> {
        // A SignerMiddleware carries exactly one wallet.
        Ok(vec![self.inner.address()])
    }

    async fn deploy_contract(
        &self,
        identifier: &str,
        params: ConstructorParams,
    ) -> Result<PendingDeployment, DeployError> {
        let artifact = artifact::load(&self.artifacts_dir, identifier)
            .map_err(|e| DeployError::SubmissionRejected(format!("artifact {identifier}: {e:#}")))?;

        let factory = ContractFactory::new(artifact.abi, artifact.bytecode, self.inner.clone());
        let deployer = factory
            .deploy_tokens(params.into_tokens())
            .map_err(|e| DeployError::SubmissionRejected(format!("constructor encoding: {e}")))?;

        // Pin the nonce so the CREATE address is known before the receipt is.
        let from = self.inner.address();
        let nonce = self
            .inner
            .get_transaction_count(from, None)
            .await
            .map_err(|e| DeployError::SubmissionRejected(format!("nonce fetch: {e}")))?;

        let mut tx = deployer.tx;
        tx.set_from(from);
        tx.set_nonce(nonce);
        let address = get_contract_address(from, nonce);

        info!(%from, %nonce, contract = identifier, "Sending deployment transaction...");
        let pending = self
            .inner
            .send_transaction(tx, None)
            .await
            .map_err(|e| DeployError::SubmissionRejected(e.to_string()))?;
        let tx_hash = pending.tx_hash();
        info!(?tx_hash, expected_address = ?address, "Deployment transaction accepted.");

        Ok(PendingDeployment { address, tx_hash })
    }

    async fn wait_for_confirmation(
        &self,
        pending: PendingDeployment,
    ) -> Result<ConfirmedDeployment, DeployError> {
        let wait = PendingTransaction::new(pending.tx_hash, self.inner.provider());
        debug!(tx_hash = ?pending.tx_hash, "Waiting for receipt...");

        match timeout(self.confirmation_timeout, wait).await {
            Ok(Ok(Some(receipt))) => {
                if receipt.status == Some(U64::from(1)) {
                    info!(
                        block = ?receipt.block_number,
                        gas_used = ?receipt.gas_used,
                        "Deployment confirmed."
                    );
                    Ok(ConfirmedDeployment {
                        // The receipt is authoritative if it names an address.
                        address: receipt.contract_address.unwrap_or(pending.address),
                        tx_hash: pending.tx_hash,
                        block_number: receipt.block_number,
                    })
                } else {
                    Err(DeployError::ConfirmationFailed(format!(
                        "transaction {:?} reverted on-chain (status 0)",
                        pending.tx_hash
                    )))
                }
            }
            Ok(Ok(None)) => Err(DeployError::ConfirmationFailed(format!(
                "receipt not found for {:?} (transaction dropped?)",
                pending.tx_hash
            ))),
            Ok(Err(e)) => Err(DeployError::ConfirmationFailed(format!(
                "error waiting for receipt of {:?}: {e}",
                pending.tx_hash
            ))),
            Err(_) => Err(DeployError::ConfirmationFailed(format!(
                "timed out after {:?} waiting for receipt of {:?}",
                self.confirmation_timeout, pending.tx_hash
            ))),
        }
    }
}
