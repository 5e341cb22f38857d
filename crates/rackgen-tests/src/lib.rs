//! RackGen End-to-End Test Infrastructure
//!
//! This crate provides integration tests for determinism-critical flows:
//!
//! - Generation: rack snapshot -> patch list
//! - CLI: rack files on disk -> exit codes and JSON output
//! - **Determinism**: identical patches, names and hashes across runs
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p rackgen-tests
//! ```
//!
//! ## Determinism Testing
//!
//! The `determinism` module provides tools for verifying that generation
//! produces identical patches across runs:
//!
//! ```rust,ignore
//! use rackgen_tests::determinism::{verify_determinism, DeterminismFixture};
//! use rackgen_tests::test_determinism;
//!
//! // Verify a single generation function
//! let result = verify_determinism(|| generate_patches(&rack, 42, &config).unwrap(), 3);
//! assert!(result.is_deterministic);
//!
//! // Use the macro for quick tests
//! test_determinism!(voice_rack_is_stable, fixtures::voice_rack());
//! ```

pub mod determinism;
pub mod fixtures;
pub mod harness;

// Re-export commonly used items
pub use determinism::{
    assert_deterministic, patches_hash, verify_determinism, verify_hash_determinism,
    DeterminismError, DeterminismFixture, DeterminismReport, DeterminismResult,
};
