// src/deploy.rs

use ethers::abi::Token;
use ethers::types::{Address, H256};
use tracing::info;

use crate::client::{ChainClient, ConfirmedDeployment};
use crate::config::Config;
use crate::error::DeployError;

/// Ordered constructor arguments for the rate contract:
/// (relay subsystem, token, owner, expected code hash). The owner slot is
/// always the resolved deployer account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstructorParams {
    pub relay_sub_address: Address,
    pub token_address: Address,
    pub owner: Address,
    pub code_hash: H256,
}

impl ConstructorParams {
    pub fn assemble(config: &Config, owner: Address) -> Self {
        Self {
            relay_sub_address: config.relay_sub_address,
            token_address: config.token_address,
            owner,
            code_hash: config.code_hash,
        }
    }

    /// ABI tokens in constructor order.
    pub fn into_tokens(self) -> Vec<Token> {
        vec![
            Token::Address(self.relay_sub_address),
            Token::Address(self.token_address),
            Token::Address(self.owner),
            Token::FixedBytes(self.code_hash.as_bytes().to_vec()),
        ]
    }
}

/// Picks the first signing identity the chain client offers.
pub async fn resolve_signer<C: ChainClient + ?Sized>(client: &C) -> Result<Address, DeployError> {
    let signers = client.list_signers().await?;
    signers.first().copied().ok_or(DeployError::NoSignerAvailable)
}

/// Drives a single deployment to completion: resolve the signer, assemble
/// constructor arguments, submit, wait for confirmation. Strictly sequential;
/// any failure short-circuits. There is nothing to roll back — an accepted
/// creation transaction cannot be withdrawn.
pub async fn run<C: ChainClient + ?Sized>(
    client: &C,
    config: &Config,
) -> Result<ConfirmedDeployment, DeployError> {
    let owner = resolve_signer(client).await?;
    info!(?owner, "Deployer account resolved.");

    let params = ConstructorParams::assemble(config, owner);
    let pending = client.deploy_contract(&config.contract_name, params).await?;
    info!(
        expected_address = ?pending.address,
        tx_hash = ?pending.tx_hash,
        "Deployment submitted, awaiting confirmation..."
    );

    client.wait_for_confirmation(pending).await
}

/// The single success line printed to stdout.
pub fn report_line(confirmed: &ConfirmedDeployment) -> String {
    format!("User Contract is deployed at {:?}", confirmed.address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_tokens_keep_their_order() {
        let params = ConstructorParams {
            relay_sub_address: Address::repeat_byte(0x11),
            token_address: Address::repeat_byte(0x22),
            owner: Address::repeat_byte(0x33),
            code_hash: H256::repeat_byte(0x44),
        };

        let tokens = params.into_tokens();
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0], Token::Address(Address::repeat_byte(0x11)));
        assert_eq!(tokens[1], Token::Address(Address::repeat_byte(0x22)));
        assert_eq!(tokens[2], Token::Address(Address::repeat_byte(0x33)));
        assert_eq!(tokens[3], Token::FixedBytes(vec![0x44; 32]));
    }

    #[test]
    fn report_line_carries_the_full_address() {
        let confirmed = ConfirmedDeployment {
            address: Address::repeat_byte(0xc0),
            tx_hash: ethers::types::TxHash::repeat_byte(0xaa),
            block_number: None,
        };
        let line = report_line(&confirmed);
        assert!(
            line.contains("0xc0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0c0"),
            "got: {line}"
        );
    }
}
