//! Generate command implementation
//!
//! Loads a rack (and optional config), runs the engine and prints the patches.

use anyhow::{Context, Result};
use colored::Colorize;
use rackgen_engine::{generate, GenerateResult, GenerationRequest};
use rackgen_spec::PatchSpec;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{
    engine_error_to_json, error_codes, input_error_to_json, to_json_string, GenerateOutput,
    JsonError,
};
use crate::input::{load_rack, resolve_config};

/// Message printed when a rack supports no archetype.
pub const NO_PATCHES_MESSAGE: &str = "no patches available for this rack";

/// Options for the generate command.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions<'a> {
    /// Path to the rack JSON file
    pub rack_path: &'a str,
    /// Seed (default 42)
    pub seed: Option<u64>,
    /// Path to an engine config JSON file
    pub config_path: Option<&'a str>,
    /// Overrides `max_patches` from the config file
    pub max_patches: Option<i64>,
    /// Attach the generation IR and provenance
    pub provenance: bool,
    /// Output machine-readable JSON
    pub json: bool,
    /// Pretty-print JSON output
    pub pretty: bool,
}

/// Run the generate command
///
/// # Returns
/// Exit code: 0 on success (including an empty result), 1 on error
pub fn run(options: &GenerateOptions<'_>) -> Result<ExitCode> {
    if options.json {
        run_json(options)
    } else {
        run_human(options)
    }
}

fn run_human(options: &GenerateOptions<'_>) -> Result<ExitCode> {
    println!("{} {}", "Generating:".cyan().bold(), options.rack_path);

    let loaded = load_rack(Path::new(options.rack_path))
        .with_context(|| format!("Failed to load rack file: {}", options.rack_path))?;
    let config = resolve_config(options.config_path, options.max_patches)
        .context("Failed to load engine config")?;

    let mut request = GenerationRequest::new(&loaded.rack).with_config(config);
    request.seed = options.seed;
    request.with_provenance = options.provenance;

    let result = generate(&request)?;
    println!("{} {}", "Seed:".dimmed(), result.seed);

    if result.patches.is_empty() {
        println!("{}", NO_PATCHES_MESSAGE.yellow());
        return Ok(ExitCode::SUCCESS);
    }

    for (i, patch) in result.patches.iter().enumerate() {
        print_patch(i + 1, patch);
    }

    print_provenance(&result);

    println!(
        "\n{} {} patch(es)",
        "SUCCESS".green().bold(),
        result.patches.len()
    );
    Ok(ExitCode::SUCCESS)
}

fn print_patch(index: usize, patch: &PatchSpec) {
    println!(
        "\n  {}. {} [{}]",
        index,
        patch.name.bold(),
        patch.category.to_string().cyan()
    );
    println!("     {}", patch.description.dimmed());
    for conn in &patch.connections {
        println!("     {}", conn);
    }
    println!(
        "     {} {:?} / {:?}{}",
        "waveform:".dimmed(),
        patch.waveform.waveform_family,
        patch.waveform.envelope_timing_class,
        if patch.waveform.noise_mix { " + noise" } else { "" }
    );
}

fn print_provenance(result: &GenerateResult) {
    if let Some(provenance) = &result.provenance {
        println!("\n{} {}", "Content hash:".dimmed(), provenance.content_hash);
        println!(
            "{} engine {}, naming v{}, {}",
            "Provenance:".dimmed(),
            provenance.engine_version,
            provenance.naming_version,
            provenance.environment.target_triple
        );
    }
}

fn run_json(options: &GenerateOptions<'_>) -> Result<ExitCode> {
    let output = match build_json_output(options) {
        Ok(result) => GenerateOutput::success(result),
        Err(errors) => GenerateOutput::failure(errors),
    };
    let success = output.success;

    match to_json_string(&output, options.pretty) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            let failure = GenerateOutput::failure(vec![JsonError::new(
                error_codes::JSON_SERIALIZE,
                e.to_string(),
            )]);
            println!("{}", to_json_string(&failure, options.pretty)?);
            return Ok(ExitCode::from(1));
        }
    }

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn build_json_output(options: &GenerateOptions<'_>) -> Result<GenerateResult, Vec<JsonError>> {
    let loaded = load_rack(Path::new(options.rack_path))
        .map_err(|e| vec![input_error_to_json(&e)])?;
    let config = resolve_config(options.config_path, options.max_patches)
        .map_err(|e| vec![input_error_to_json(&e)])?;

    let mut request = GenerationRequest::new(&loaded.rack).with_config(config);
    request.seed = options.seed;
    request.with_provenance = options.provenance;

    generate(&request).map_err(|e| engine_error_to_json(&e))
}
