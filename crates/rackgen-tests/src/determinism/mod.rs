//! Determinism testing framework for RackGen.
//!
//! This module provides utilities for verifying that patch generation produces
//! identical output across multiple runs.
//!
//! # Overview
//!
//! RackGen guarantees deterministic output: given the same rack, seed and
//! config, the generated patches must be identical down to names, cable order
//! and waveform hints. This module provides tools to verify this property
//! across:
//!
//! - Multiple runs of the same generation function
//! - Many racks and seeds in one batch
//!
//! # Example
//!
//! ```rust,ignore
//! use rackgen_tests::determinism::{verify_determinism, DeterminismFixture};
//!
//! // Verify a single generation function
//! let result = verify_determinism(|| generate_patches(&rack, 42, &config).unwrap(), 3);
//! assert!(result.is_deterministic);
//!
//! // Verify many racks and seeds
//! let report = DeterminismFixture::new()
//!     .add_rack("voice", fixtures::voice_rack())
//!     .seeds([1, 7, 42])
//!     .runs(5)
//!     .run();
//! assert!(report.all_deterministic());
//! ```

pub mod builder;
pub mod core;
pub mod fixture;
#[macro_use]
pub mod macros;
pub mod report;


// Re-export core types and functions for convenience
pub use builder::DeterminismBuilder;
pub use core::{
    assert_deterministic, patches_hash, verify_determinism, verify_hash_determinism,
    DeterminismResult, DiffInfo,
};
pub use fixture::DeterminismFixture;
pub use report::{DeterminismError, DeterminismReport, DeterminismReportEntry};
