//! RackGen Canonical Types Library
//!
//! This crate provides the data model, validation, and hashing for RackGen,
//! the deterministic patch generation engine for modular-synthesizer racks.
//!
//! # Overview
//!
//! - **Inputs**: a [`RackSnapshot`] (ordered modules with types and tags), a
//!   seed, and a [`PatchEngineConfig`]
//! - **Outputs**: [`PatchSpec`] records (connections, category, name,
//!   waveform hints)
//! - **Provenance**: a [`GenerationIr`] snapshot of the inputs, its content
//!   hash, and a [`Provenance`] record with non-reproducible bookkeeping
//!
//! # Example
//!
//! ```
//! use rackgen_spec::{GenerationIr, ModuleRef, PatchEngineConfig, RackSnapshot};
//! use rackgen_spec::validation::{validate_config, validate_rack};
//!
//! let rack = RackSnapshot::new(vec![
//!     ModuleRef::new("O1", "VCO"),
//!     ModuleRef::new("A1", "VCA"),
//! ]);
//! let config = PatchEngineConfig::default();
//!
//! assert!(validate_rack(&rack).is_ok());
//! assert!(validate_config(&config).is_ok());
//!
//! let ir = GenerationIr::build(&rack, &config, 42, "1.0.0");
//! let hash = ir.content_hash().unwrap();
//! assert_eq!(hash.len(), 64);
//! ```
//!
//! # Modules
//!
//! - [`config`]: Engine configuration and defaults
//! - [`error`]: Error and warning types for validation
//! - [`hash`]: Canonical JSON and BLAKE3 hashing
//! - [`ir`]: Generation IR
//! - [`patch`]: Connection, category and patch types
//! - [`provenance`]: Provenance records and builder
//! - [`rack`]: Rack snapshot types
//! - [`validation`]: Rack and config validation

pub mod config;
pub mod error;
pub mod hash;
pub mod ir;
pub mod patch;
pub mod provenance;
pub mod rack;
pub mod validation;

// Re-export commonly used types at the crate root
pub use config::{PatchEngineConfig, DEFAULT_MAX_PATCHES, DEFAULT_SEED, MAX_PATCHES_LIMIT};
pub use error::{
    BackendError, ErrorCode, SpecError, ValidationError, ValidationResult, ValidationWarning,
    WarningCode,
};
pub use hash::{blake3_hash, canonical_hash, canonical_value_hash, canonicalize_json};
pub use ir::{GenerationIr, ModuleIr, IR_VERSION};
pub use patch::{
    CableType, Category, Connection, EnvelopeTimingClass, PatchSpec, WaveformFamily,
    WaveformParams,
};
pub use provenance::{EnvironmentFingerprint, Provenance, ProvenanceBuilder};
pub use rack::{ModuleRef, RackSnapshot};
pub use validation::{is_valid_module_id, validate_config, validate_rack};
