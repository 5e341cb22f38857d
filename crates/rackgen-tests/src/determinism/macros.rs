//! Macros for determinism testing.

/// Macro for easy determinism testing.
///
/// This macro generates a test function that generates patches for a rack
/// several times with the same seed and default config, and verifies that
/// every run produced the same patch list. The seed defaults to 42.
///
/// # Example
///
/// ```rust,ignore
/// use rackgen_tests::test_determinism;
///
/// test_determinism!(voice_rack_default_seed, fixtures::voice_rack());
///
/// test_determinism!(full_rack_seed_7, seed = 7, fixtures::full_rack());
/// ```
#[macro_export]
macro_rules! test_determinism {
    ($name:ident, seed = $seed:expr, $rack:expr) => {
        #[test]
        fn $name() {
            let rack: ::rackgen_spec::RackSnapshot = $rack;
            let seed: u64 = $seed;
            let config = ::rackgen_spec::PatchEngineConfig::default();
            $crate::determinism::verify_determinism(
                || {
                    ::rackgen_engine::generate_patches(&rack, seed, &config)
                        .expect("generation failed")
                },
                3,
            )
            .assert_deterministic();
        }
    };

    ($name:ident, $rack:expr) => {
        $crate::test_determinism!(
            $name,
            seed = $crate::determinism::macros::DEFAULT_MACRO_SEED,
            $rack
        );
    };
}

/// Seed used by [`test_determinism!`] when none is given.
pub const DEFAULT_MACRO_SEED: u64 = rackgen_spec::DEFAULT_SEED;
