//! Name command implementation
//!
//! Prints the deterministic name for a seed and category.

use anyhow::Result;
use rackgen_engine::{name_for_version, NAMING_VERSION};
use std::process::ExitCode;

/// Run the name command
///
/// # Arguments
/// * `seed` - Generation seed
/// * `category` - Category string (any text; patch categories use their display names)
/// * `naming_version` - Word-list version (default: current)
pub fn run(seed: u64, category: &str, naming_version: Option<u32>) -> Result<ExitCode> {
    println!("{}", resolve(seed, category, naming_version)?);
    Ok(ExitCode::SUCCESS)
}

/// Computes the name without printing it.
pub fn resolve(seed: u64, category: &str, naming_version: Option<u32>) -> Result<String> {
    let version = naming_version.unwrap_or(NAMING_VERSION);
    Ok(name_for_version(seed, category, version)?)
}
