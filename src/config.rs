// src/config.rs

use dotenv::dotenv;
use ethers::types::{Address, H256};
use ethers::utils::to_checksum;
use eyre::{bail, Result, WrapErr};
use std::env;
use std::path::PathBuf;
use tracing::info;

/// All deployment parameters live here as data, never as literals embedded
/// in the orchestration flow. Loading fails fast on malformed values, before
/// any chain interaction.
#[derive(Debug, Clone)]
pub struct Config {
    // Network & Keys
    pub http_rpc_url: String,
    pub local_private_key: String,

    // Artifact store
    pub artifacts_dir: PathBuf,
    pub contract_name: String,

    // Constructor Parameters
    pub relay_sub_address: Address,
    pub token_address: Address,
    pub code_hash: H256,

    // Confirmation Options
    pub confirmation_timeout_secs: u64,
}

pub fn load_config() -> Result<Config> {
    dotenv().ok();

    let parse_u64_env = |var_name: &str, default: u64| -> u64 {
        env::var(var_name).ok().and_then(|s| s.parse::<u64>().ok()).unwrap_or(default)
    };
    let require = |var_name: &str| -> Result<String> {
        env::var(var_name).wrap_err_with(|| format!("{var_name} must be set"))
    };

    // --- Load vars ---
    let http_rpc_url = require("HTTP_RPC_URL")?;
    let local_private_key = require("LOCAL_PRIVATE_KEY")?;
    let artifacts_dir =
        PathBuf::from(env::var("ARTIFACTS_DIR").unwrap_or_else(|_| "./artifacts".to_string()));
    let contract_name = env::var("CONTRACT_NAME").unwrap_or_else(|_| "EthRate".to_string());
    let relay_sub_address = parse_address("RELAY_SUB_ADDRESS", &require("RELAY_SUB_ADDRESS")?)?;
    let token_address = parse_address("TOKEN_ADDRESS", &require("TOKEN_ADDRESS")?)?;
    let code_hash = parse_code_hash(&require("CODE_HASH")?)?;
    let confirmation_timeout_secs = parse_u64_env("CONFIRMATION_TIMEOUT_SECS", 120);

    let config = Config {
        http_rpc_url,
        local_private_key,
        artifacts_dir,
        contract_name,
        relay_sub_address,
        token_address,
        code_hash,
        confirmation_timeout_secs,
    };

    info!(contract = %config.contract_name, "Configuration loaded.");
    Ok(config)
}

/// Strict 20-byte hex address validation. Over-length or otherwise malformed
/// values are rejected outright, never truncated or corrected.
pub fn parse_address(name: &str, raw: &str) -> Result<Address> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    if digits.len() != 40 {
        bail!(
            "{name} must be 40 hex digits (20 bytes), got {} in {trimmed:?}",
            digits.len()
        );
    }
    let address = digits
        .parse::<Address>()
        .wrap_err_with(|| format!("{name} is not valid hex: {trimmed:?}"))?;

    // Mixed-case input carries an EIP-55 checksum; verify it instead of
    // silently accepting a mistyped address.
    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    if has_upper && has_lower && format!("0x{digits}") != to_checksum(&address, None) {
        bail!("{name} failed EIP-55 checksum validation: {trimmed:?}");
    }
    Ok(address)
}

/// Strict 32-byte hex digest validation for the expected code hash.
pub fn parse_code_hash(raw: &str) -> Result<H256> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    if digits.len() != 64 {
        bail!(
            "CODE_HASH must be 64 hex digits (32 bytes), got {} in {trimmed:?}",
            digits.len()
        );
    }
    digits
        .parse::<H256>()
        .wrap_err_with(|| format!("CODE_HASH is not valid hex: {trimmed:?}"))
}
