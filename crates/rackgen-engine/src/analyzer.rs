//! Module analyzer: classifies rack modules into functional roles.
//!
//! Classification is a case-insensitive substring match of each module's
//! declared type and tags against a fixed keyword table. A module may hold
//! several roles; a module matching nothing holds none.

use std::collections::BTreeMap;

use rackgen_spec::{ModuleRef, RackSnapshot};
use serde::{Deserialize, Serialize};

/// Functional role of a module within a patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Periodic sound source.
    Oscillator,
    /// Spectral shaping.
    Filter,
    /// Level control.
    Amplifier,
    /// Contour generator.
    Envelope,
    /// Low-frequency or random control source.
    Modulator,
    /// Step, arpeggio or clock source.
    Sequencer,
    /// Signal summing.
    Mixer,
    /// Time-based or spatial processing.
    Effect,
    /// Attenuators, multiples, logic and similar helpers.
    Utility,
    /// Noise generator.
    NoiseSource,
}

impl Role {
    /// Returns the snake_case name of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Oscillator => "oscillator",
            Role::Filter => "filter",
            Role::Amplifier => "amplifier",
            Role::Envelope => "envelope",
            Role::Modulator => "modulator",
            Role::Sequencer => "sequencer",
            Role::Mixer => "mixer",
            Role::Effect => "effect",
            Role::Utility => "utility",
            Role::NoiseSource => "noise_source",
        }
    }

    /// Returns every role in declaration order.
    pub fn all() -> &'static [Role] {
        &[
            Role::Oscillator,
            Role::Filter,
            Role::Amplifier,
            Role::Envelope,
            Role::Modulator,
            Role::Sequencer,
            Role::Mixer,
            Role::Effect,
            Role::Utility,
            Role::NoiseSource,
        ]
    }

    /// Lowercase keywords that place a module in this role.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Role::Oscillator => &["oscillator", "vco", "osc", "wavetable"],
            Role::Filter => &["filter", "vcf"],
            Role::Amplifier => &["amplifier", "vca", "gain"],
            Role::Envelope => &["envelope", "adsr", "contour"],
            Role::Modulator => &["lfo", "modulator", "sample and hold", "s&h"],
            Role::Sequencer => &["sequencer", "seq", "arpeggiator", "clock"],
            Role::Mixer => &["mixer", "mix"],
            Role::Effect => &["effect", "delay", "reverb", "chorus", "fx"],
            Role::Utility => &["utility", "attenuator", "multiple", "offset", "logic"],
            Role::NoiseSource => &["noise"],
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returns the roles a module holds, in [`Role::all`] order.
pub fn classify_module(module: &ModuleRef) -> Vec<Role> {
    let mut haystacks = Vec::with_capacity(1 + module.tags.len());
    haystacks.push(module.module_type.to_lowercase());
    haystacks.extend(module.tags.iter().map(|t| t.to_lowercase()));

    Role::all()
        .iter()
        .copied()
        .filter(|role| {
            role.keywords()
                .iter()
                .any(|kw| haystacks.iter().any(|h| h.contains(kw)))
        })
        .collect()
}

/// Modules of a rack grouped by role.
///
/// Each list keeps rack order. Borrowed from the snapshot it was built from.
#[derive(Debug, Clone, Default)]
pub struct RoleMap<'a> {
    by_role: BTreeMap<Role, Vec<&'a ModuleRef>>,
    by_id: BTreeMap<&'a str, Vec<Role>>,
}

impl<'a> RoleMap<'a> {
    /// Modules holding `role`, in rack order.
    pub fn modules(&self, role: Role) -> &[&'a ModuleRef] {
        self.by_role.get(&role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of modules holding `role`.
    pub fn count(&self, role: Role) -> usize {
        self.modules(role).len()
    }

    /// Roles held by the module with `id`.
    pub fn roles_of(&self, id: &str) -> &[Role] {
        self.by_id.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns true if the module with `id` holds `role`.
    pub fn has_role(&self, id: &str, role: Role) -> bool {
        self.roles_of(id).contains(&role)
    }

    /// Returns true if no module holds any role.
    pub fn is_empty(&self) -> bool {
        self.by_role.values().all(Vec::is_empty)
    }

    /// Role lists as module ids, for reporting.
    pub fn summary(&self) -> BTreeMap<Role, Vec<String>> {
        Role::all()
            .iter()
            .map(|role| {
                let ids = self.modules(*role).iter().map(|m| m.id.clone()).collect();
                (*role, ids)
            })
            .collect()
    }
}

/// Classifies every module of a rack.
pub fn analyze(rack: &RackSnapshot) -> RoleMap<'_> {
    let mut map = RoleMap::default();
    for role in Role::all() {
        map.by_role.insert(*role, Vec::new());
    }

    for module in &rack.modules {
        let roles = classify_module(module);
        for role in &roles {
            map.by_role.entry(*role).or_default().push(module);
        }
        map.by_id.insert(module.id.as_str(), roles);
    }

    map
}
