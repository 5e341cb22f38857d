//! RackGen patch engine
//!
//! Turns a [`RackSnapshot`](rackgen_spec::RackSnapshot) into a short list of
//! suggested patches. Generation is fully deterministic: the same rack, seed
//! and config always produce the same patches, names and waveform hints.
//!
//! # Pipeline
//!
//! 1. [`analyzer`] classifies modules into [`Role`]s
//! 2. [`archetype`] builders wire candidate patches from the role map, drawing
//!    from a single seeded PCG32 ([`rng`])
//! 3. [`naming`] and [`waveform`] decorate each patch
//! 4. [`generate`] optionally snapshots the inputs as a
//!    [`GenerationIr`](rackgen_spec::GenerationIr) with provenance
//!
//! # Example
//!
//! ```
//! use rackgen_engine::{generate, GenerationRequest};
//! use rackgen_spec::{Category, ModuleRef, RackSnapshot};
//!
//! let rack = RackSnapshot::new(vec![
//!     ModuleRef::new("O1", "VCO"),
//!     ModuleRef::new("F1", "VCF"),
//!     ModuleRef::new("A1", "VCA"),
//! ]);
//!
//! let result = generate(&GenerationRequest::new(&rack).with_seed(42)).unwrap();
//! assert_eq!(result.patches.len(), 1);
//! assert_eq!(result.patches[0].category, Category::Drone);
//! ```

pub mod analyzer;
pub mod archetype;
pub mod error;
pub mod generate;
pub mod naming;
pub mod rng;
pub mod waveform;

pub use analyzer::{analyze, classify_module, Role, RoleMap};
pub use archetype::{Archetype, PatchDraft};
pub use error::{EngineError, EngineResult};
pub use generate::{
    check_connections, check_inputs, generate, generate_patches, generate_with_rng,
    GenerateResult, GenerationRequest, ENGINE_VERSION,
};
pub use naming::{deterministic_name, name_for_version, NameKey, NAMING_VERSION};
pub use waveform::infer_waveform;
