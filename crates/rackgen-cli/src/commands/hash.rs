//! Hash command implementation
//!
//! Prints the content hash of the generation IR for a rack, seed and config.
//! Config resolution matches `generate`, so the printed hash equals the
//! `content_hash` of `generate --provenance` run with the same flags.

use anyhow::{Context, Result};
use rackgen_engine::{check_inputs, ENGINE_VERSION};
use rackgen_spec::{GenerationIr, DEFAULT_SEED};
use std::path::Path;
use std::process::ExitCode;
use tracing::debug;

use crate::input::{load_rack, resolve_config};

/// Run the hash command
pub fn run(
    rack_path: &str,
    seed: Option<u64>,
    config_path: Option<&str>,
    max_patches: Option<i64>,
) -> Result<ExitCode> {
    let hash = content_hash(rack_path, seed, config_path, max_patches)?;
    println!("{}", hash);
    Ok(ExitCode::SUCCESS)
}

/// Computes the IR content hash without printing it.
///
/// Rejects an invalid rack or config the same way generation does.
pub fn content_hash(
    rack_path: &str,
    seed: Option<u64>,
    config_path: Option<&str>,
    max_patches: Option<i64>,
) -> Result<String> {
    let loaded = load_rack(Path::new(rack_path))
        .with_context(|| format!("Failed to load rack file: {}", rack_path))?;
    let config = resolve_config(config_path, max_patches)
        .context("Failed to load engine config")?;
    check_inputs(&loaded.rack, &config)?;

    let seed = seed.unwrap_or(DEFAULT_SEED);
    let ir = GenerationIr::build(&loaded.rack, &config, seed, ENGINE_VERSION);
    let hash = ir.content_hash()?;
    debug!(seed, source_hash = %loaded.source_hash, %hash, "hashed generation inputs");
    Ok(hash)
}
