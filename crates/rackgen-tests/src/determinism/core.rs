//! Core determinism verification types and functions.
//!
//! Patch lists are compared one serialized patch at a time so a failure
//! points at the first patch that drifted, not just at a hash mismatch.

use std::fmt;

use rackgen_spec::{canonical_hash, PatchSpec};

/// Result of a determinism verification.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether all runs produced identical output.
    pub is_deterministic: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// Number of patches in the reference run.
    pub patch_count: usize,
    /// Canonical BLAKE3 hash of the reference patch list.
    pub hash: String,
    /// If non-deterministic, information about the first difference found.
    pub diff_info: Option<DiffInfo>,
}

/// Information about the first patch that differed between runs.
#[derive(Debug, Clone)]
pub struct DiffInfo {
    /// Which run (0-indexed) produced the differing output.
    pub run_index: usize,
    /// Index of the first differing patch.
    pub patch_index: usize,
    /// Patch JSON from the reference run, `None` if the run had fewer patches.
    pub expected: Option<String>,
    /// Patch JSON from the differing run, `None` if the run had fewer patches.
    pub actual: Option<String>,
}

impl fmt::Display for DiffInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Difference at patch {} (run {} vs run 0)",
            self.patch_index, self.run_index
        )?;
        writeln!(
            f,
            "  expected: {}",
            self.expected.as_deref().unwrap_or("<missing>")
        )?;
        write!(
            f,
            "  actual:   {}",
            self.actual.as_deref().unwrap_or("<missing>")
        )
    }
}

impl DeterminismResult {
    /// Create a successful (deterministic) result.
    pub fn success(runs: usize, patch_count: usize, hash: String) -> Self {
        Self {
            is_deterministic: true,
            runs,
            patch_count,
            hash,
            diff_info: None,
        }
    }

    /// Create a failure (non-deterministic) result.
    pub fn failure(runs: usize, patch_count: usize, hash: String, diff_info: DiffInfo) -> Self {
        Self {
            is_deterministic: false,
            runs,
            patch_count,
            hash,
            diff_info: Some(diff_info),
        }
    }

    /// Panic with a detailed message if not deterministic.
    pub fn assert_deterministic(&self) {
        if let Some(diff) = self.diff_info.as_ref().filter(|_| !self.is_deterministic) {
            panic!(
                "Non-deterministic output detected!\n\
                 Runs: {}\n\
                 Patches: {}\n\
                 Hash: {}\n\
                 {}",
                self.runs, self.patch_count, self.hash, diff
            );
        }
    }
}

/// Run generation N times and verify all patch lists are identical.
///
/// # Arguments
///
/// * `generate_fn` - A function that generates a patch list
/// * `runs` - Number of times to run the generation (minimum 2)
///
/// # Example
///
/// ```rust,ignore
/// use rackgen_tests::determinism::verify_determinism;
///
/// let result = verify_determinism(|| {
///     generate_patches(&rack, 42, &config).unwrap()
/// }, 3);
///
/// assert!(result.is_deterministic, "Patch generation must be deterministic");
/// ```
pub fn verify_determinism<F>(generate_fn: F, runs: usize) -> DeterminismResult
where
    F: Fn() -> Vec<PatchSpec>,
{
    assert!(runs >= 2, "Must run at least 2 times to verify determinism");

    let first = generate_fn();
    let reference = serialize_patches(&first);
    let reference_hash = patches_hash(&first);

    for run_index in 1..runs {
        let output = serialize_patches(&generate_fn());
        if let Some(diff) = find_first_difference(&reference, &output, run_index) {
            return DeterminismResult::failure(runs, reference.len(), reference_hash, diff);
        }
    }

    DeterminismResult::success(runs, reference.len(), reference_hash)
}

fn serialize_patches(patches: &[PatchSpec]) -> Vec<String> {
    patches
        .iter()
        .map(|p| p.to_json().expect("Failed to serialize patch"))
        .collect()
}

/// Find the first differing patch between two serialized runs.
pub(crate) fn find_first_difference(
    expected: &[String],
    actual: &[String],
    run_index: usize,
) -> Option<DiffInfo> {
    let len = expected.len().max(actual.len());
    (0..len).find_map(|patch_index| {
        let e = expected.get(patch_index);
        let a = actual.get(patch_index);
        if e == a {
            None
        } else {
            Some(DiffInfo {
                run_index,
                patch_index,
                expected: e.cloned(),
                actual: a.cloned(),
            })
        }
    })
}

/// Compare hashes of multiple runs.
///
/// A quick check for determinism when you already have computed hashes
/// from multiple runs.
///
/// # Returns
///
/// `true` if all hashes are identical, `false` otherwise.
pub fn verify_hash_determinism(hashes: &[String]) -> bool {
    match hashes.first() {
        Some(reference) => hashes.iter().all(|h| h == reference),
        None => true,
    }
}

/// Canonical BLAKE3 hash of a patch list.
pub fn patches_hash(patches: &[PatchSpec]) -> String {
    canonical_hash(&patches).expect("Failed to hash patches")
}

/// Helper to verify determinism of a closure returning a patch list.
///
/// # Example
///
/// ```rust,ignore
/// use rackgen_tests::determinism::assert_deterministic;
///
/// let rack = fixtures::voice_rack();
/// assert_deterministic(3, || generate_patches(&rack, 42, &config).unwrap());
/// ```
pub fn assert_deterministic<F>(runs: usize, generate_fn: F)
where
    F: Fn() -> Vec<PatchSpec>,
{
    verify_determinism(&generate_fn, runs).assert_deterministic();
}
