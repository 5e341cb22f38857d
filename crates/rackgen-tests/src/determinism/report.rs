//! Error types and reporting infrastructure for determinism testing.

use std::fmt;

use crate::determinism::core::DeterminismResult;

/// Error type for determinism testing.
#[derive(Debug, Clone)]
pub enum DeterminismError {
    /// The engine rejected the rack or config.
    GenerationFailed(String),
}

impl fmt::Display for DeterminismError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GenerationFailed(e) => write!(f, "Generation failed: {}", e),
        }
    }
}

impl std::error::Error for DeterminismError {}

/// Entry in a determinism report for one rack and seed.
#[derive(Debug)]
pub struct DeterminismReportEntry {
    /// Fixture label of the rack.
    pub label: String,
    /// Seed used for every run.
    pub seed: u64,
    /// Result of the determinism test.
    pub result: Result<DeterminismResult, DeterminismError>,
}

impl DeterminismReportEntry {
    /// Check if this entry passed determinism verification.
    pub fn passed(&self) -> bool {
        matches!(&self.result, Ok(r) if r.is_deterministic)
    }
}

/// Report of determinism tests across multiple racks and seeds.
#[derive(Debug, Default)]
pub struct DeterminismReport {
    /// Individual test entries.
    pub entries: Vec<DeterminismReportEntry>,
}

impl DeterminismReport {
    /// Create a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry to the report.
    pub fn add_entry(&mut self, entry: DeterminismReportEntry) {
        self.entries.push(entry);
    }

    /// Check if all entries passed determinism verification.
    pub fn all_deterministic(&self) -> bool {
        self.entries.iter().all(|e| e.passed())
    }

    /// Get number of passed tests.
    pub fn passed_count(&self) -> usize {
        self.entries.iter().filter(|e| e.passed()).count()
    }

    /// Get number of failed tests.
    pub fn failed_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.passed()).count()
    }

    /// Get total number of tests.
    pub fn total_count(&self) -> usize {
        self.entries.len()
    }

    /// Get all failed entries.
    pub fn failures(&self) -> Vec<&DeterminismReportEntry> {
        self.entries.iter().filter(|e| !e.passed()).collect()
    }

    /// Panic if any tests failed, with detailed report.
    pub fn assert_all_deterministic(&self) {
        if !self.all_deterministic() {
            panic!("Determinism verification failed!\n{}", self);
        }
    }
}

impl fmt::Display for DeterminismReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Determinism Report: {}/{} passed",
            self.passed_count(),
            self.total_count()
        )?;

        for entry in &self.entries {
            let status = if entry.passed() { "PASS" } else { "FAIL" };
            writeln!(f, "  [{}] {} (seed {})", status, entry.label, entry.seed)?;

            if !entry.passed() {
                match &entry.result {
                    Ok(result) => {
                        if let Some(diff) = &result.diff_info {
                            writeln!(f, "        {}", diff)?;
                        }
                    }
                    Err(e) => {
                        writeln!(f, "        Error: {}", e)?;
                    }
                }
            }
        }

        Ok(())
    }
}
