//! Provenance records attached to a generation run.
//!
//! Only `content_hash` is reproducible. Every other field is bookkeeping
//! about when and where the run happened and never feeds the hash.

use serde::{Deserialize, Serialize};

use crate::error::SpecError;
use crate::hash::blake3_hash;
use crate::ir::{GenerationIr, IR_VERSION};

/// Identifies the build target a run executed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentFingerprint {
    /// Rust target triple (e.g., "x86_64-unknown-linux-gnu").
    pub target_triple: String,
    /// Pointer width in bits.
    pub pointer_width: u32,
    /// BLAKE3 hex over `target_triple|pointer_width|engine_version`.
    pub fingerprint: String,
}

impl EnvironmentFingerprint {
    /// Fingerprints the current build target for an engine version.
    pub fn detect(engine_version: &str) -> Self {
        Self::new(detect_target_triple(), usize::BITS, engine_version)
    }

    /// Builds a fingerprint from explicit values.
    pub fn new(target_triple: String, pointer_width: u32, engine_version: &str) -> Self {
        let fingerprint = blake3_hash(
            format!("{}|{}|{}", target_triple, pointer_width, engine_version).as_bytes(),
        );
        Self {
            target_triple,
            pointer_width,
            fingerprint,
        }
    }
}

/// Provenance of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    /// Hex BLAKE3 hash of the canonical generation IR.
    pub content_hash: String,
    /// RFC 3339 timestamp of the run.
    pub created_at: String,
    /// Engine version that produced the run.
    pub engine_version: String,
    /// IR schema version.
    pub ir_version: u32,
    /// Naming word-list version used for patch names.
    pub naming_version: u32,
    /// Build target description.
    pub environment: EnvironmentFingerprint,
    /// Git commit of the engine build (if known).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_commit: Option<String>,
    /// Whether the engine build had uncommitted changes (if known).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_dirty: Option<bool>,
}

impl Provenance {
    /// Creates a builder for the given IR.
    pub fn builder(ir: &GenerationIr) -> ProvenanceBuilder<'_> {
        ProvenanceBuilder::new(ir)
    }

    /// Serializes the provenance to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Returns true if this record describes a run over the given IR.
    pub fn matches(&self, ir: &GenerationIr) -> bool {
        ir.content_hash()
            .map(|hash| hash == self.content_hash)
            .unwrap_or(false)
    }
}

/// Builder for [`Provenance`] records.
pub struct ProvenanceBuilder<'a> {
    ir: &'a GenerationIr,
    naming_version: u32,
    created_at: Option<String>,
    environment: Option<EnvironmentFingerprint>,
    git_commit: Option<String>,
    git_dirty: Option<bool>,
}

impl<'a> ProvenanceBuilder<'a> {
    /// Creates a builder for the given IR.
    pub fn new(ir: &'a GenerationIr) -> Self {
        Self {
            ir,
            naming_version: 0,
            created_at: None,
            environment: None,
            git_commit: None,
            git_dirty: None,
        }
    }

    /// Sets the naming word-list version.
    pub fn naming_version(mut self, version: u32) -> Self {
        self.naming_version = version;
        self
    }

    /// Overrides the run timestamp (defaults to the current UTC time).
    pub fn created_at(mut self, timestamp: impl Into<String>) -> Self {
        self.created_at = Some(timestamp.into());
        self
    }

    /// Overrides the environment fingerprint (defaults to the current target).
    pub fn environment(mut self, environment: EnvironmentFingerprint) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Sets git provenance metadata.
    pub fn git_metadata(mut self, commit: impl Into<String>, dirty: bool) -> Self {
        self.git_commit = Some(commit.into());
        self.git_dirty = Some(dirty);
        self
    }

    /// Builds the record, hashing the IR.
    pub fn build(self) -> Result<Provenance, SpecError> {
        let content_hash = self.ir.content_hash()?;
        let engine_version = self.ir.engine_version.clone();

        Ok(Provenance {
            content_hash,
            created_at: self
                .created_at
                .unwrap_or_else(|| chrono::Utc::now().to_rfc3339()),
            environment: self
                .environment
                .unwrap_or_else(|| EnvironmentFingerprint::detect(&engine_version)),
            engine_version,
            ir_version: IR_VERSION,
            naming_version: self.naming_version,
            git_commit: self.git_commit,
            git_dirty: self.git_dirty,
        })
    }
}

/// Detects the current target triple.
fn detect_target_triple() -> String {
    #[cfg(target_arch = "x86_64")]
    const ARCH: &str = "x86_64";
    #[cfg(target_arch = "x86")]
    const ARCH: &str = "i686";
    #[cfg(target_arch = "aarch64")]
    const ARCH: &str = "aarch64";
    #[cfg(target_arch = "arm")]
    const ARCH: &str = "arm";
    #[cfg(target_arch = "wasm32")]
    const ARCH: &str = "wasm32";
    #[cfg(not(any(
        target_arch = "x86_64",
        target_arch = "x86",
        target_arch = "aarch64",
        target_arch = "arm",
        target_arch = "wasm32"
    )))]
    const ARCH: &str = "unknown";

    #[cfg(target_vendor = "pc")]
    const VENDOR: &str = "pc";
    #[cfg(target_vendor = "apple")]
    const VENDOR: &str = "apple";
    #[cfg(not(any(target_vendor = "pc", target_vendor = "apple")))]
    const VENDOR: &str = "unknown";

    #[cfg(target_os = "windows")]
    const OS: &str = "windows";
    #[cfg(target_os = "linux")]
    const OS: &str = "linux";
    #[cfg(target_os = "macos")]
    const OS: &str = "darwin";
    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    const OS: &str = "unknown";

    #[cfg(target_env = "msvc")]
    const ENV: &str = "msvc";
    #[cfg(target_env = "gnu")]
    const ENV: &str = "gnu";
    #[cfg(target_env = "musl")]
    const ENV: &str = "musl";
    #[cfg(not(any(target_env = "msvc", target_env = "gnu", target_env = "musl")))]
    const ENV: &str = "";

    // ENV is conditionally compiled, so is_empty() varies by platform
    #[allow(clippy::const_is_empty)]
    if ENV.is_empty() {
        format!("{}-{}-{}", ARCH, VENDOR, OS)
    } else {
        format!("{}-{}-{}-{}", ARCH, VENDOR, OS, ENV)
    }
}
