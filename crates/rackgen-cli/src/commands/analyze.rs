//! Analyze command implementation
//!
//! Prints the role classification of every module in a rack.

use anyhow::{Context, Result};
use colored::Colorize;
use rackgen_engine::{analyze, Role};
use std::path::Path;
use std::process::ExitCode;

use crate::input::load_rack;

/// Run the analyze command
///
/// # Arguments
/// * `rack_path` - Path to the rack JSON file
/// * `json_output` - Whether to print the role map as JSON
///
/// # Returns
/// Exit code: 0 on success
pub fn run(rack_path: &str, json_output: bool) -> Result<ExitCode> {
    let loaded = load_rack(Path::new(rack_path))
        .with_context(|| format!("Failed to load rack file: {}", rack_path))?;
    let roles = analyze(&loaded.rack);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&roles.summary())?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "Analyzing:".cyan().bold(), rack_path);
    for role in Role::all() {
        let ids: Vec<&str> = roles.modules(*role).iter().map(|m| m.id.as_str()).collect();
        if ids.is_empty() {
            println!("  {:<13} {}", role.as_str(), "-".dimmed());
        } else {
            println!("  {:<13} {}", role.as_str(), ids.join(", "));
        }
    }

    let unclassified: Vec<&str> = loaded
        .rack
        .modules
        .iter()
        .filter(|m| roles.roles_of(&m.id).is_empty())
        .map(|m| m.id.as_str())
        .collect();
    if !unclassified.is_empty() {
        println!(
            "  {} unclassified: {}",
            "!".yellow(),
            unclassified.join(", ")
        );
    }

    Ok(ExitCode::SUCCESS)
}
