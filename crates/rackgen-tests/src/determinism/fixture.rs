//! Batch determinism checks over racks and seeds.

use rackgen_engine::generate_patches;
use rackgen_spec::{PatchEngineConfig, RackSnapshot};

use crate::determinism::core::verify_determinism;
use crate::determinism::report::{DeterminismError, DeterminismReport, DeterminismReportEntry};

/// A set of racks, each generated under every configured seed.
#[derive(Debug, Clone)]
pub struct DeterminismFixture {
    racks: Vec<(String, RackSnapshot)>,
    seeds: Vec<u64>,
    config: PatchEngineConfig,
    runs: usize,
}

impl Default for DeterminismFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl DeterminismFixture {
    /// Create an empty fixture: seed 42, default config, 3 runs.
    pub fn new() -> Self {
        Self {
            racks: Vec::new(),
            seeds: vec![rackgen_spec::DEFAULT_SEED],
            config: PatchEngineConfig::default(),
            runs: 3,
        }
    }

    /// Add a labelled rack.
    pub fn add_rack(mut self, label: impl Into<String>, rack: RackSnapshot) -> Self {
        self.racks.push((label.into(), rack));
        self
    }

    /// Add several labelled racks.
    pub fn add_racks<I, S>(mut self, racks: I) -> Self
    where
        I: IntoIterator<Item = (S, RackSnapshot)>,
        S: Into<String>,
    {
        self.racks
            .extend(racks.into_iter().map(|(label, rack)| (label.into(), rack)));
        self
    }

    /// Replace the seed list.
    pub fn seeds(mut self, seeds: impl IntoIterator<Item = u64>) -> Self {
        self.seeds = seeds.into_iter().collect();
        self
    }

    /// Set the engine config used for every run.
    pub fn config(mut self, config: PatchEngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the number of runs per rack and seed.
    pub fn runs(mut self, runs: usize) -> Self {
        self.runs = runs;
        self
    }

    /// Number of rack/seed combinations this fixture will check.
    pub fn case_count(&self) -> usize {
        self.racks.len() * self.seeds.len()
    }

    /// Run every combination and collect the results.
    pub fn run(&self) -> DeterminismReport {
        let mut report = DeterminismReport::new();

        for (label, rack) in &self.racks {
            for &seed in &self.seeds {
                let result = match generate_patches(rack, seed, &self.config) {
                    Ok(_) => Ok(verify_determinism(
                        || generate_patches(rack, seed, &self.config).unwrap_or_default(),
                        self.runs,
                    )),
                    Err(e) => Err(DeterminismError::GenerationFailed(e.to_string())),
                };
                report.add_entry(DeterminismReportEntry {
                    label: label.clone(),
                    seed,
                    result,
                });
            }
        }

        report
    }
}
