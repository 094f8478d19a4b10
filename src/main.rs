// src/main.rs

use ethers::{
    middleware::SignerMiddleware,
    providers::{Http, Middleware, Provider},
    signers::{LocalWallet, Signer},
};
use eyre::{Result, WrapErr};
use std::{sync::Arc, time::Duration};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ethrate_deployer::{client::EthersClient, config::load_config, deploy};

#[tokio::main]
async fn main() {
    // Diagnostics go to stderr; stdout carries only the deployed address.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    // Exit-code translation happens exactly once, here: 0 on a confirmed
    // deployment, 1 on any failure.
    match run().await {
        Ok(line) => println!("{line}"),
        Err(e) => {
            eprintln!("Deployment failed: {e:#}");
            std::process::exit(1);
        }
    }
}

async fn run() -> Result<String> {
    let config = load_config()?;

    // Setup provider & client
    let provider = Provider::<Http>::try_from(config.http_rpc_url.clone())?;
    let chain_id = provider
        .get_chainid()
        .await
        .wrap_err("Failed to reach RPC endpoint")?
        .as_u64();
    info!(chain_id, "RPC OK.");
    let wallet = config
        .local_private_key
        .parse::<LocalWallet>()
        .wrap_err("LOCAL_PRIVATE_KEY is not a valid private key")?
        .with_chain_id(chain_id);
    let client = Arc::new(SignerMiddleware::new(provider, wallet));

    let chain = EthersClient::new(
        client,
        config.artifacts_dir.clone(),
        Duration::from_secs(config.confirmation_timeout_secs),
    );

    let confirmed = deploy::run(&chain, &config).await?;
    Ok(deploy::report_line(&confirmed))
}
