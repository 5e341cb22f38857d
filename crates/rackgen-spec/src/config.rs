//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Seed used when the caller does not supply one.
pub const DEFAULT_SEED: u64 = 42;

/// Default cap on the number of patches produced per call.
pub const DEFAULT_MAX_PATCHES: i64 = 8;

/// Largest accepted `max_patches` value.
pub const MAX_PATCHES_LIMIT: i64 = 256;

/// Options recognized by the patch engine.
///
/// `max_patches` is signed so negative values supplied by callers reach
/// validation instead of failing at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PatchEngineConfig {
    /// Upper bound on the number of patches returned.
    pub max_patches: i64,

    /// Reserved: permit feedback loops. Currently has no effect.
    pub allow_feedback: bool,

    /// Reserved: bias toward fewer connections. Currently has no effect.
    pub prefer_simple: bool,
}

impl Default for PatchEngineConfig {
    fn default() -> Self {
        Self {
            max_patches: DEFAULT_MAX_PATCHES,
            allow_feedback: false,
            prefer_simple: false,
        }
    }
}

impl PatchEngineConfig {
    /// Sets `max_patches`.
    pub fn with_max_patches(mut self, max_patches: i64) -> Self {
        self.max_patches = max_patches;
        self
    }

    /// Parses a config from JSON. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the config to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Returns `max_patches` as a usize cap, clamping negatives to zero.
    ///
    /// Callers are expected to have validated the config first.
    pub fn patch_cap(&self) -> usize {
        self.max_patches.clamp(0, MAX_PATCHES_LIMIT) as usize
    }

    /// Returns true if any reserved (no-op) option is set.
    pub fn uses_reserved_options(&self) -> bool {
        self.allow_feedback || self.prefer_simple
    }
}
