//! Patch archetypes and the shared wiring helpers their builders use.
//!
//! Each archetype has a pure precondition over the [`RoleMap`] and a builder
//! that draws modules from the shared RNG in a fixed order. Builders never
//! look at anything but the role map and the RNG, so for a given seed the
//! sequence of draws, and therefore the output, is fixed.

mod generative;
mod processing;
mod rhythmic;
mod subtractive;

use rackgen_spec::{CableType, Category, Connection, ModuleRef};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::analyzer::{Role, RoleMap};
use crate::rng::pick_index;

/// Port names used by the builders.
pub mod ports {
    /// Main signal output.
    pub const OUT: &str = "out";
    /// Main signal input.
    pub const IN: &str = "in";
    /// Level / amount control input.
    pub const CV: &str = "cv";
    /// Filter cutoff control.
    pub const CUTOFF: &str = "cutoff";
    /// Filter resonance control.
    pub const RESONANCE: &str = "resonance";
    /// Oscillator frequency modulation input.
    pub const FM: &str = "fm";
    /// Oscillator pulse-width modulation input.
    pub const PWM: &str = "pwm";
    /// Pitch CV (sequencer output and oscillator input).
    pub const PITCH: &str = "pitch";
    /// Gate (sequencer output and envelope input).
    pub const GATE: &str = "gate";
}

/// The rule-based patch archetypes, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    /// Oscillator through filter and amplifier, shaped by an envelope.
    SubtractiveVoice,
    /// Sequencer- and modulator-driven self-playing patch.
    Generative,
    /// Noise or oscillator source gated by a short envelope.
    Rhythmic,
    /// A source feeding an effect.
    ProcessingChain,
}

impl Archetype {
    /// Evaluation order. Patches are emitted in this order and truncated
    /// from the end when the cap is reached.
    pub const ORDER: [Archetype; 4] = [
        Archetype::SubtractiveVoice,
        Archetype::Generative,
        Archetype::Rhythmic,
        Archetype::ProcessingChain,
    ];

    /// Returns the snake_case name of this archetype.
    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::SubtractiveVoice => "subtractive_voice",
            Archetype::Generative => "generative",
            Archetype::Rhythmic => "rhythmic",
            Archetype::ProcessingChain => "processing_chain",
        }
    }

    /// Returns true if the rack has the roles this archetype requires.
    pub fn is_feasible(&self, roles: &RoleMap<'_>) -> bool {
        match self {
            Archetype::SubtractiveVoice => {
                roles.count(Role::Oscillator) >= 1 && roles.count(Role::Amplifier) >= 1
            }
            Archetype::Generative => {
                roles.count(Role::Sequencer) >= 1 || roles.count(Role::Modulator) >= 2
            }
            Archetype::Rhythmic => {
                roles.count(Role::NoiseSource) >= 1 || roles.count(Role::Envelope) >= 1
            }
            Archetype::ProcessingChain => roles.count(Role::Effect) >= 1,
        }
    }

    /// Builds one draft patch, or `None` when the builder wires nothing.
    pub fn build<R: Rng + ?Sized>(&self, roles: &RoleMap<'_>, rng: &mut R) -> Option<PatchDraft> {
        let draft = match self {
            Archetype::SubtractiveVoice => subtractive::build(roles, rng),
            Archetype::Generative => generative::build(roles, rng),
            Archetype::Rhythmic => rhythmic::build(roles, rng),
            Archetype::ProcessingChain => processing::build(roles, rng),
        };
        draft.filter(|d| !d.connections.is_empty())
    }
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A patch as produced by a builder, before naming and waveform inference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchDraft {
    /// Archetype that produced the draft.
    pub archetype: Archetype,
    /// Patch category.
    pub category: Category,
    /// Cables in build order.
    pub connections: Vec<Connection>,
    /// One-line description of the signal flow.
    pub description: String,
}

/// Tracks the modules and cables of a patch under construction.
pub(crate) struct Wiring<'a> {
    used: Vec<&'a str>,
    connections: Vec<Connection>,
}

impl<'a> Wiring<'a> {
    pub(crate) fn new() -> Self {
        Self {
            used: Vec::new(),
            connections: Vec::new(),
        }
    }

    /// Picks one module of `role` not yet used in this patch.
    ///
    /// Consumes exactly one draw when a candidate remains and none otherwise.
    pub(crate) fn pick<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        roles: &RoleMap<'a>,
        role: Role,
    ) -> Option<&'a ModuleRef> {
        let candidates: Vec<&'a ModuleRef> = roles
            .modules(role)
            .iter()
            .copied()
            .filter(|m| !self.used.contains(&m.id.as_str()))
            .collect();

        let module = candidates[pick_index(rng, candidates.len())?];
        self.used.push(module.id.as_str());
        Some(module)
    }

    /// Adds a cable.
    pub(crate) fn connect(
        &mut self,
        from: &ModuleRef,
        from_port: &str,
        to: &ModuleRef,
        to_port: &str,
        cable_type: CableType,
    ) {
        self.connections
            .push(Connection::new(&from.id, from_port, &to.id, to_port, cable_type));
    }

    /// Wires consecutive modules of `chain` out to in with audio cables.
    pub(crate) fn audio_chain(&mut self, chain: &[&ModuleRef]) {
        for pair in chain.windows(2) {
            self.connect(pair[0], ports::OUT, pair[1], ports::IN, CableType::Audio);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.connections.len()
    }

    pub(crate) fn finish(
        self,
        archetype: Archetype,
        category: Category,
        description: String,
    ) -> PatchDraft {
        PatchDraft {
            archetype,
            category,
            connections: self.connections,
            description,
        }
    }
}

/// Joins module ids with arrows for descriptions.
pub(crate) fn describe_chain(chain: &[&ModuleRef]) -> String {
    chain
        .iter()
        .map(|m| m.id.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}
