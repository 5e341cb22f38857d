//! Error types for the patch engine.

use rackgen_spec::{BackendError, SpecError, ValidationError};
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur during patch generation.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Engine configuration failed validation.
    #[error("invalid configuration: {}", join_errors(.0))]
    InvalidConfiguration(Vec<ValidationError>),

    /// Rack snapshot failed validation.
    #[error("invalid rack: {}", join_errors(.0))]
    InvalidRack(Vec<ValidationError>),

    /// A generated connection broke a structural invariant.
    #[error("invariant violation in {archetype} patch: {message}")]
    InvariantViolation {
        /// Archetype whose builder produced the connection.
        archetype: String,
        /// What was wrong.
        message: String,
    },

    /// Naming word-list version is not known to this build.
    #[error("unknown naming version {version} (latest is {latest})")]
    UnknownNamingVersion {
        /// Requested version.
        version: u32,
        /// Latest version this build knows.
        latest: u32,
    },

    /// Canonicalization or serialization failure from the data model.
    #[error(transparent)]
    Spec(#[from] SpecError),
}

impl EngineError {
    /// Creates an invariant violation error.
    pub fn invariant(archetype: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            archetype: archetype.into(),
            message: message.into(),
        }
    }

    /// Returns the validation errors carried by input rejections.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            EngineError::InvalidConfiguration(errors) | EngineError::InvalidRack(errors) => errors,
            _ => &[],
        }
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl BackendError for EngineError {
    fn code(&self) -> &'static str {
        match self {
            EngineError::InvalidConfiguration(_) => "PATCH_001",
            EngineError::InvalidRack(_) => "PATCH_002",
            EngineError::InvariantViolation { .. } => "PATCH_003",
            EngineError::UnknownNamingVersion { .. } => "PATCH_004",
            EngineError::Spec(_) => "PATCH_005",
        }
    }

    fn category(&self) -> &'static str {
        "patch"
    }
}
