//! Validate command implementation
//!
//! Validates a rack file and an optional engine config without generating.

use anyhow::{Context, Result};
use colored::Colorize;
use rackgen_spec::{validate_config, validate_rack, ValidationResult};
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{
    input_error_to_json, validation_error_to_json, validation_warning_to_json, ValidateOutput,
};
use crate::input::{load_config, load_rack, InputError};

/// Run the validate command
///
/// # Arguments
/// * `rack_path` - Path to the rack JSON file
/// * `config_path` - Optional path to an engine config JSON file
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(rack_path: &str, config_path: Option<&str>, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(rack_path, config_path)
    } else {
        run_human(rack_path, config_path)
    }
}

/// Validates the rack and (if given) the config file together.
///
/// Returns the merged result and the BLAKE3 hash of the rack file.
pub fn validate_files(
    rack_path: &str,
    config_path: Option<&str>,
) -> Result<(ValidationResult, String)> {
    load_and_validate(rack_path, config_path)
        .with_context(|| format!("Failed to load input for: {}", rack_path))
}

fn load_and_validate(
    rack_path: &str,
    config_path: Option<&str>,
) -> Result<(ValidationResult, String), InputError> {
    let loaded = load_rack(Path::new(rack_path))?;
    let mut result = validate_rack(&loaded.rack);
    if let Some(path) = config_path {
        let config = load_config(Path::new(path))?;
        result.merge(validate_config(&config));
    }
    Ok((result, loaded.source_hash))
}

fn run_human(rack_path: &str, config_path: Option<&str>) -> Result<ExitCode> {
    println!("{} {}", "Validating:".cyan().bold(), rack_path);

    let (result, source_hash) = validate_files(rack_path, config_path)?;
    println!("{} {}", "Source:".dimmed(), &source_hash[..16]);

    for error in &result.errors {
        println!("  {} {}", "x".red(), error);
    }
    for warning in &result.warnings {
        println!("  {} {}", "!".yellow(), warning);
    }

    if result.is_ok() {
        println!("\n{} Rack is valid", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "\n{} Rack has {} error(s)",
            "FAILED".red().bold(),
            result.errors.len()
        );
        Ok(ExitCode::from(1))
    }
}

fn run_json(rack_path: &str, config_path: Option<&str>) -> Result<ExitCode> {
    let output = match load_and_validate(rack_path, config_path) {
        Ok((result, source_hash)) => ValidateOutput {
            success: result.is_ok(),
            errors: result.errors.iter().map(validation_error_to_json).collect(),
            warnings: result.warnings.iter().map(validation_warning_to_json).collect(),
            source_hash: Some(source_hash),
        },
        Err(error) => ValidateOutput {
            success: false,
            errors: vec![input_error_to_json(&error)],
            warnings: Vec::new(),
            source_hash: None,
        },
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
