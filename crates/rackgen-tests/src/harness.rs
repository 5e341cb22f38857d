//! Test harness utilities for running CLI commands against files on disk.
//!
//! Commands run in-process through `rackgen_cli::commands`, so a test sees
//! the same exit codes the binary would return without spawning `cargo run`.

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use tempfile::TempDir;

use rackgen_cli::commands;
use rackgen_cli::commands::generate::GenerateOptions;
use rackgen_cli::input::{load_rack, resolve_config};
use rackgen_engine::{generate, GenerateResult, GenerationRequest};
use rackgen_spec::{PatchEngineConfig, RackSnapshot};

use crate::fixtures;

/// A test harness owning a scratch directory for rack and config files.
pub struct TestHarness {
    /// Working directory for test inputs.
    pub work_dir: TempDir,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHarness {
    /// Create a new test harness.
    pub fn new() -> Self {
        Self {
            work_dir: TempDir::new().expect("Failed to create work dir"),
        }
    }

    /// Get the working directory path.
    pub fn path(&self) -> &Path {
        self.work_dir.path()
    }

    /// Write a rack file and return its path as a string.
    pub fn write_rack(&self, name: &str, rack: &RackSnapshot) -> String {
        path_string(&fixtures::write_rack(self.path(), name, rack))
    }

    /// Write a config file and return its path as a string.
    pub fn write_config(&self, name: &str, config: &PatchEngineConfig) -> String {
        path_string(&fixtures::write_config(self.path(), name, config))
    }

    /// Write arbitrary text (for malformed-input tests) and return its path.
    pub fn write_raw(&self, file_name: &str, content: &str) -> String {
        let path = self.path().join(file_name);
        fs::write(&path, content).expect("Failed to write file");
        path_string(&path)
    }

    /// Run `rackgen generate`.
    pub fn generate(&self, options: &GenerateOptions<'_>) -> ExitCode {
        commands::generate::run(options).unwrap_or(ExitCode::FAILURE)
    }

    /// Run `rackgen validate`.
    pub fn validate(&self, rack_path: &str, config_path: Option<&str>, json: bool) -> ExitCode {
        commands::validate::run(rack_path, config_path, json).unwrap_or(ExitCode::FAILURE)
    }

    /// Run `rackgen analyze`.
    pub fn analyze(&self, rack_path: &str, json: bool) -> ExitCode {
        commands::analyze::run(rack_path, json).unwrap_or(ExitCode::FAILURE)
    }

    /// Load files the way `rackgen generate` does and return the engine
    /// result instead of printing it.
    pub fn generate_result(
        &self,
        rack_path: &str,
        config_path: Option<&str>,
        seed: Option<u64>,
        with_provenance: bool,
    ) -> Result<GenerateResult, String> {
        let loaded = load_rack(Path::new(rack_path)).map_err(|e| e.to_string())?;
        let config = resolve_config(config_path, None).map_err(|e| e.to_string())?;

        let mut request = GenerationRequest::new(&loaded.rack).with_config(config);
        request.seed = seed;
        request.with_provenance = with_provenance;
        generate(&request).map_err(|e| e.to_string())
    }
}

fn path_string(path: &Path) -> String {
    path.to_str().expect("non-UTF-8 temp path").to_string()
}
