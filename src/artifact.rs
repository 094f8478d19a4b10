// src/artifact.rs

use ethers::abi::Abi;
use ethers::types::Bytes;
use eyre::{bail, Result, WrapErr};
use std::{fs, path::Path};

/// A pre-built contract artifact: ABI plus creation bytecode, produced by a
/// separate compilation toolchain. Laid out on disk as `<dir>/<Name>.json`
/// and `<dir>/<Name>.bin`.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub abi: Abi,
    pub bytecode: Bytes,
}

pub fn load(dir: &Path, name: &str) -> Result<Artifact> {
    let abi_path = dir.join(format!("{name}.json"));
    let abi_str = fs::read_to_string(&abi_path)
        .wrap_err_with(|| format!("Failed to read ABI file: {abi_path:?}"))?;
    let abi: Abi = serde_json::from_str(&abi_str)
        .wrap_err_with(|| format!("Failed to parse ABI JSON: {abi_path:?}"))?;

    let bin_path = dir.join(format!("{name}.bin"));
    let bytecode_hex = fs::read_to_string(&bin_path)
        .wrap_err_with(|| format!("Failed to read bytecode file: {bin_path:?}"))?;
    let bytecode = decode_bytecode(&bytecode_hex)
        .wrap_err_with(|| format!("Invalid bytecode in {bin_path:?}"))?;

    Ok(Artifact { abi, bytecode })
}

/// Decodes a hex bytecode dump, tolerating a `0x` prefix and surrounding
/// whitespace (solc and hardhat disagree on both).
pub fn decode_bytecode(raw: &str) -> Result<Bytes> {
    let cleaned = raw.trim().trim_start_matches("0x");
    if cleaned.is_empty() {
        bail!("bytecode file is empty");
    }
    let bytes = hex::decode(cleaned).wrap_err("Failed to decode hex bytecode")?;
    Ok(Bytes::from(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ethrate-artifact-{tag}-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    #[test]
    fn decodes_prefixed_bytecode_with_whitespace() {
        let bytes = decode_bytecode("  0x6001600a\n").expect("valid hex");
        assert_eq!(bytes.as_ref(), &[0x60, 0x01, 0x60, 0x0a]);
    }

    #[test]
    fn decodes_unprefixed_bytecode() {
        let bytes = decode_bytecode("00").expect("valid hex");
        assert_eq!(bytes.as_ref(), &[0x00]);
    }

    #[test]
    fn rejects_invalid_hex() {
        assert!(decode_bytecode("0x60xx").is_err());
    }

    #[test]
    fn rejects_empty_bytecode() {
        assert!(decode_bytecode("0x").is_err());
        assert!(decode_bytecode("   ").is_err());
    }

    #[test]
    fn loads_artifact_pair_from_disk() {
        let dir = scratch_dir("load");
        fs::write(dir.join("Demo.json"), "[]").unwrap();
        fs::write(dir.join("Demo.bin"), "0x6000\n").unwrap();

        let artifact = load(&dir, "Demo").expect("artifact should load");
        assert_eq!(artifact.bytecode.as_ref(), &[0x60, 0x00]);
        assert!(artifact.abi.constructor.is_none());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_abi_file_is_an_error() {
        let dir = scratch_dir("missing");
        let err = load(&dir, "Nope").unwrap_err();
        assert!(err.to_string().contains("ABI file"), "got: {err}");
        fs::remove_dir_all(&dir).ok();
    }
}
