//! Rack snapshot types.

use serde::{Deserialize, Serialize};

/// A single module placed in a rack.
///
/// `module_type` and `tags` are free-form strings as they come from the
/// catalog; role classification happens later in the engine's analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleRef {
    /// Stable identifier, unique within the rack.
    pub id: String,

    /// Declared module type (e.g., "VCO", "Dual ADSR").
    #[serde(rename = "type")]
    pub module_type: String,

    /// Free-form functional tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl ModuleRef {
    /// Creates a module without tags.
    pub fn new(id: impl Into<String>, module_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            module_type: module_type.into(),
            tags: Vec::new(),
        }
    }

    /// Adds a tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// An immutable, ordered snapshot of the modules in a rack.
///
/// Module order is significant: the generator's seeded selections index into
/// role lists that preserve this order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RackSnapshot {
    /// Modules in rack order.
    #[serde(default)]
    pub modules: Vec<ModuleRef>,
}

impl RackSnapshot {
    /// Creates a snapshot from an ordered module list.
    pub fn new(modules: Vec<ModuleRef>) -> Self {
        Self { modules }
    }

    /// Creates an empty rack.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Appends a module, builder style.
    pub fn with_module(mut self, module: ModuleRef) -> Self {
        self.modules.push(module);
        self
    }

    /// Parses a rack from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the rack to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the rack to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Number of modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns true if the rack has no modules.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Looks up a module by id.
    pub fn get(&self, id: &str) -> Option<&ModuleRef> {
        self.modules.iter().find(|m| m.id == id)
    }

    /// Returns true if a module with this id is present.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Iterates over module ids in rack order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(|m| m.id.as_str())
    }
}
