//! Generation IR: the canonical, hashable snapshot of a generation call's inputs.
//!
//! The IR observes what the generator was asked to do. It is built from the
//! rack, config and seed alone and is never read back by the generator.

use serde::{Deserialize, Serialize};

use crate::config::PatchEngineConfig;
use crate::error::SpecError;
use crate::hash::{canonical_hash, canonicalize_json};
use crate::rack::{ModuleRef, RackSnapshot};

/// Current IR schema version.
pub const IR_VERSION: u32 = 1;

/// Canonical form of one rack module.
///
/// Tags are a set: they are lowercased, sorted and deduplicated so that
/// declaration order never changes the hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleIr {
    /// Module id.
    pub id: String,
    /// Declared module type.
    pub module_type: String,
    /// Normalized tag set.
    pub tags: Vec<String>,
}

impl ModuleIr {
    /// Builds the canonical form of a module.
    pub fn from_module(module: &ModuleRef) -> Self {
        let mut tags: Vec<String> = module.tags.iter().map(|t| t.to_lowercase()).collect();
        tags.sort();
        tags.dedup();

        Self {
            id: module.id.clone(),
            module_type: module.module_type.clone(),
            tags,
        }
    }
}

/// Snapshot of every semantic input to a generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationIr {
    /// IR schema version.
    pub ir_version: u32,
    /// Engine version whose draw order produced (or will produce) the output.
    pub engine_version: String,
    /// Generation seed.
    pub seed: u64,
    /// Engine configuration.
    pub config: PatchEngineConfig,
    /// Modules in rack order.
    pub rack: Vec<ModuleIr>,
}

impl GenerationIr {
    /// Builds the IR for one generation call.
    pub fn build(
        rack: &RackSnapshot,
        config: &PatchEngineConfig,
        seed: u64,
        engine_version: &str,
    ) -> Self {
        Self {
            ir_version: IR_VERSION,
            engine_version: engine_version.to_string(),
            seed,
            config: config.clone(),
            rack: rack.modules.iter().map(ModuleIr::from_module).collect(),
        }
    }

    /// Returns the canonical JSON serialization.
    pub fn canonical_json(&self) -> Result<String, SpecError> {
        let value = serde_json::to_value(self)?;
        canonicalize_json(&value)
    }

    /// Returns the content hash (64 lowercase hex characters).
    ///
    /// A pure function of the IR's fields.
    pub fn content_hash(&self) -> Result<String, SpecError> {
        canonical_hash(self)
    }

    /// Parses an IR from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the IR to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn voice_rack() -> RackSnapshot {
        RackSnapshot::new(vec![
            ModuleRef::new("O1", "VCO").tag("Analog").tag("complex"),
            ModuleRef::new("A1", "VCA"),
        ])
    }

    #[test]
    fn test_canonical_json_layout() {
        let ir = GenerationIr::build(&voice_rack(), &PatchEngineConfig::default(), 42, "1.0.0");
        assert_eq!(
            ir.canonical_json().unwrap(),
            concat!(
                r#"{"config":{"allow_feedback":false,"max_patches":8,"prefer_simple":false},"#,
                r#""engine_version":"1.0.0","ir_version":1,"#,
                r#""rack":[{"id":"O1","module_type":"VCO","tags":["analog","complex"]},"#,
                r#"{"id":"A1","module_type":"VCA","tags":[]}],"seed":42}"#
            )
        );
    }

    #[test]
    fn test_hash_stable_across_builds() {
        let a = GenerationIr::build(&voice_rack(), &PatchEngineConfig::default(), 42, "1.0.0");
        let b = GenerationIr::build(&voice_rack(), &PatchEngineConfig::default(), 42, "1.0.0");
        assert_eq!(a.content_hash().unwrap(), b.content_hash().unwrap());
    }

    #[test]
    fn test_tag_order_does_not_change_hash() {
        let rack_a = RackSnapshot::new(vec![ModuleRef::new("O1", "VCO").tag("b").tag("a")]);
        let retagged = ModuleRef::new("O1", "VCO").tag("A").tag("b").tag("a");
        let rack_b = RackSnapshot::new(vec![retagged]);
        let config = PatchEngineConfig::default();
        assert_eq!(
            GenerationIr::build(&rack_a, &config, 1, "1.0.0").content_hash().unwrap(),
            GenerationIr::build(&rack_b, &config, 1, "1.0.0").content_hash().unwrap()
        );
    }

    #[test]
    fn test_semantic_changes_change_hash() {
        let config = PatchEngineConfig::default();
        let base = GenerationIr::build(&voice_rack(), &config, 42, "1.0.0")
            .content_hash()
            .unwrap();

        let other_seed = GenerationIr::build(&voice_rack(), &config, 43, "1.0.0")
            .content_hash()
            .unwrap();
        let other_rack = GenerationIr::build(
            &voice_rack().with_module(ModuleRef::new("F1", "VCF")),
            &config,
            42,
            "1.0.0",
        )
        .content_hash()
        .unwrap();
        let other_config =
            GenerationIr::build(&voice_rack(), &config.with_max_patches(1), 42, "1.0.0")
                .content_hash()
                .unwrap();

        assert_ne!(base, other_seed);
        assert_ne!(base, other_rack);
        assert_ne!(base, other_config);
    }

    #[test]
    fn test_module_order_is_significant() {
        let config = PatchEngineConfig::default();
        let forward = RackSnapshot::new(vec![
            ModuleRef::new("O1", "VCO"),
            ModuleRef::new("A1", "VCA"),
        ]);
        let reversed = RackSnapshot::new(vec![
            ModuleRef::new("A1", "VCA"),
            ModuleRef::new("O1", "VCO"),
        ]);
        assert_ne!(
            GenerationIr::build(&forward, &config, 7, "1.0.0").content_hash().unwrap(),
            GenerationIr::build(&reversed, &config, 7, "1.0.0").content_hash().unwrap()
        );
    }

    #[test]
    fn test_ir_json_round_trip() {
        let ir = GenerationIr::build(&voice_rack(), &PatchEngineConfig::default(), 9, "1.0.0");
        let parsed = GenerationIr::from_json(&ir.to_json_pretty().unwrap()).unwrap();
        assert_eq!(parsed, ir);
        assert_eq!(parsed.content_hash().unwrap(), ir.content_hash().unwrap());
    }
}
