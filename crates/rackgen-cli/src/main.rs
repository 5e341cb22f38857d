//! RackGen CLI - Command-line interface for deterministic patch generation
//!
//! This binary provides commands for analyzing racks, generating patches,
//! naming, hashing and validating inputs.

mod cli_args;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli_args::{Cli, Commands};
use rackgen_cli::commands;
use rackgen_cli::commands::generate::GenerateOptions;

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            rack,
            seed,
            config,
            max_patches,
            provenance,
            json,
            pretty,
        } => commands::generate::run(&GenerateOptions {
            rack_path: &rack,
            seed,
            config_path: config.as_deref(),
            max_patches,
            provenance,
            json,
            pretty,
        }),
        Commands::Analyze { rack, json } => commands::analyze::run(&rack, json),
        Commands::Name {
            seed,
            category,
            naming_version,
        } => commands::name::run(seed, &category, naming_version),
        Commands::Hash {
            rack,
            seed,
            config,
            max_patches,
        } => commands::hash::run(&rack, seed, config.as_deref(), max_patches),
        Commands::Validate { rack, config, json } => {
            commands::validate::run(&rack, config.as_deref(), json)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
