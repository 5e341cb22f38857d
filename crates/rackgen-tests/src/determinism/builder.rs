//! Builder pattern for custom determinism tests.

use rackgen_spec::PatchSpec;

use crate::determinism::core::{verify_determinism, DeterminismResult};

/// Builder for custom determinism tests with explicit generation functions.
///
/// Use this when the patch list comes from something other than a plain
/// `generate_patches(&rack, seed, &config)` call, for example a request with
/// provenance attached or an injected RNG.
///
/// # Example
///
/// ```rust,ignore
/// use rackgen_tests::determinism::DeterminismBuilder;
///
/// let result = DeterminismBuilder::new()
///     .runs(5)
///     .generate(|| {
///         let request = GenerationRequest::new(&rack).with_seed(7).with_provenance();
///         generate(&request).unwrap().patches
///     })
///     .verify();
/// ```
pub struct DeterminismBuilder<F>
where
    F: Fn() -> Vec<PatchSpec>,
{
    runs: usize,
    generator: Option<F>,
}

impl<F> DeterminismBuilder<F>
where
    F: Fn() -> Vec<PatchSpec>,
{
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            runs: 3,
            generator: None,
        }
    }

    /// Set the number of runs.
    pub fn runs(mut self, runs: usize) -> Self {
        self.runs = runs;
        self
    }

    /// Set the generation function.
    pub fn generate(mut self, f: F) -> Self {
        self.generator = Some(f);
        self
    }

    /// Verify determinism and return the result.
    ///
    /// # Panics
    /// Panics if no generator was set.
    pub fn verify(self) -> DeterminismResult {
        let generator = self
            .generator
            .expect("No generator set - call .generate() first");
        verify_determinism(generator, self.runs)
    }

    /// Verify determinism and panic on failure.
    ///
    /// # Panics
    /// Panics if no generator was set or if output is non-deterministic.
    pub fn assert(self) {
        self.verify().assert_deterministic();
    }
}

impl<F> Default for DeterminismBuilder<F>
where
    F: Fn() -> Vec<PatchSpec>,
{
    fn default() -> Self {
        Self::new()
    }
}
