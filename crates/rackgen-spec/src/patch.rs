//! Patch output types: cables, connections, categories and rendering hints.

use serde::{Deserialize, Serialize};

/// Kind of signal a cable carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CableType {
    /// Audio-rate signal.
    Audio,
    /// Control voltage.
    Cv,
    /// Gate or trigger.
    Gate,
    /// Clock pulses.
    Clock,
}

impl CableType {
    /// Returns the cable type as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CableType::Audio => "audio",
            CableType::Cv => "cv",
            CableType::Gate => "gate",
            CableType::Clock => "clock",
        }
    }

    /// Returns all cable types.
    pub fn all() -> &'static [CableType] {
        &[
            CableType::Audio,
            CableType::Cv,
            CableType::Gate,
            CableType::Clock,
        ]
    }
}

impl std::fmt::Display for CableType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single patch cable between two module ports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Connection {
    /// Source module id.
    pub from_module_id: String,
    /// Source port name.
    pub from_port: String,
    /// Destination module id.
    pub to_module_id: String,
    /// Destination port name.
    pub to_port: String,
    /// Signal kind.
    pub cable_type: CableType,
}

impl Connection {
    /// Creates a connection.
    pub fn new(
        from_module_id: impl Into<String>,
        from_port: impl Into<String>,
        to_module_id: impl Into<String>,
        to_port: impl Into<String>,
        cable_type: CableType,
    ) -> Self {
        Self {
            from_module_id: from_module_id.into(),
            from_port: from_port.into(),
            to_module_id: to_module_id.into(),
            to_port: to_port.into(),
            cable_type,
        }
    }

    /// Returns true if this cable runs from `from` to `to`.
    pub fn links(&self, from: &str, to: &str) -> bool {
        self.from_module_id == from && self.to_module_id == to
    }
}

impl std::fmt::Display for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{} -> {}.{} ({})",
            self.from_module_id, self.from_port, self.to_module_id, self.to_port, self.cable_type
        )
    }
}

/// Patch category. A closed set; display strings are part of the output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    /// Monophonic lead voice.
    Lead,
    /// Bass voice.
    Bass,
    /// Slow pad.
    Pad,
    /// Ungated, sustained tone.
    Drone,
    /// Self-playing sequenced or modulated patch.
    Generative,
    /// Percussive or clocked patch.
    #[serde(rename = "Clock-Rhythm")]
    ClockRhythm,
    /// Effects processing chain.
    #[serde(rename = "Texture-FX")]
    TextureFx,
    /// Utility routing.
    Utility,
}

impl Category {
    /// Returns the display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Lead => "Lead",
            Category::Bass => "Bass",
            Category::Pad => "Pad",
            Category::Drone => "Drone",
            Category::Generative => "Generative",
            Category::ClockRhythm => "Clock-Rhythm",
            Category::TextureFx => "Texture-FX",
            Category::Utility => "Utility",
        }
    }

    /// Returns all categories.
    pub fn all() -> &'static [Category] {
        &[
            Category::Lead,
            Category::Bass,
            Category::Pad,
            Category::Drone,
            Category::Generative,
            Category::ClockRhythm,
            Category::TextureFx,
            Category::Utility,
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::all()
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown category: {}", s))
    }
}

/// Oscillator family a renderer should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveformFamily {
    /// Sine wave.
    Sine,
    /// Triangle wave.
    Triangle,
    /// Sawtooth wave.
    Saw,
    /// Square / pulse wave.
    Square,
    /// Noise.
    Noise,
    /// Modulated, non-periodic shape.
    Complex,
}

/// Envelope shape class a renderer should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvelopeTimingClass {
    /// Short attack, short decay.
    Percussive,
    /// Short attack, medium decay.
    Plucked,
    /// Held at sustain level.
    Sustained,
    /// Slow attack and release.
    Swell,
    /// No envelope; the amplifier is gated or open.
    Gated,
}

/// Rendering parameters consumed by an external waveform renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WaveformParams {
    /// Oscillator family.
    pub waveform_family: WaveformFamily,
    /// Envelope shape class.
    pub envelope_timing_class: EnvelopeTimingClass,
    /// Whether the render mixes in noise.
    pub noise_mix: bool,
}

/// A generated patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchSpec {
    /// Deterministic human-readable name.
    pub name: String,
    /// Patch category.
    pub category: Category,
    /// Cables in build order.
    pub connections: Vec<Connection>,
    /// One-line description of the signal flow.
    pub description: String,
    /// Seed of the generation call that produced this patch.
    pub generation_seed: u64,
    /// Rendering hints for the waveform preview.
    pub waveform: WaveformParams,
    /// Naming word-list version the name was drawn from.
    pub naming_version: u32,
}

impl PatchSpec {
    /// Module ids referenced by this patch, in first-use order without repeats.
    pub fn module_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for conn in &self.connections {
            for id in [conn.from_module_id.as_str(), conn.to_module_id.as_str()] {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }
        ids
    }

    /// Returns true if any connection runs from `from` to `to` with the given cable type.
    pub fn has_link(&self, from: &str, to: &str, cable_type: CableType) -> bool {
        self.connections
            .iter()
            .any(|c| c.links(from, to) && c.cable_type == cable_type)
    }

    /// Serializes the patch to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
