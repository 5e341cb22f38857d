//! CLI argument definitions for the RackGen command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{Parser, Subcommand};

/// RackGen - Deterministic patch generation for modular-synth racks
#[derive(Parser)]
#[command(name = "rackgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Log engine decisions to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Generate patches for a rack
    Generate {
        /// Path to the rack JSON file
        #[arg(short, long)]
        rack: String,

        /// Generation seed (default: 42)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Path to an engine config JSON file
        #[arg(short, long)]
        config: Option<String>,

        /// Maximum number of patches (overrides the config file)
        #[arg(long, allow_negative_numbers = true)]
        max_patches: Option<i64>,

        /// Attach the generation IR and provenance record
        #[arg(long)]
        provenance: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Show the role classification of every module in a rack
    Analyze {
        /// Path to the rack JSON file
        #[arg(short, long)]
        rack: String,

        /// Output the role map as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the deterministic name for a seed and category
    Name {
        /// Generation seed
        #[arg(short, long)]
        seed: u64,

        /// Category (e.g. Lead, Clock-Rhythm, or any free text)
        #[arg(short, long)]
        category: String,

        /// Naming word-list version (default: current)
        #[arg(long)]
        naming_version: Option<u32>,
    },

    /// Print the generation IR content hash for a rack, seed and config
    Hash {
        /// Path to the rack JSON file
        #[arg(short, long)]
        rack: String,

        /// Generation seed (default: 42)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Path to an engine config JSON file
        #[arg(short, long)]
        config: Option<String>,

        /// Maximum number of patches (overrides the config file)
        #[arg(long, allow_negative_numbers = true)]
        max_patches: Option<i64>,
    },

    /// Validate a rack file and optional engine config
    Validate {
        /// Path to the rack JSON file
        #[arg(short, long)]
        rack: String,

        /// Path to an engine config JSON file
        #[arg(short, long)]
        config: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}
