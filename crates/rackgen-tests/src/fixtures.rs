//! Rack fixtures shared by the integration tests.
//!
//! Each fixture exercises one or more archetypes. Module ids are stable so
//! golden expectations can refer to them directly.

use std::fs;
use std::path::{Path, PathBuf};

use rackgen_spec::{ModuleRef, PatchEngineConfig, RackSnapshot};

/// Module type strings used by property tests to build arbitrary racks.
///
/// Covers every role at least once, a few multi-role types and some types
/// that match no role at all.
pub const MODULE_TYPES: &[&str] = &[
    "VCO",
    "Wavetable Oscillator",
    "VCF",
    "Ladder Filter",
    "VCA",
    "Gain Stage",
    "ADSR",
    "Contour",
    "LFO",
    "Sample and Hold",
    "Sequencer",
    "Clock Divider",
    "Mixer",
    "Reverb",
    "Delay",
    "Chorus FX",
    "Attenuator",
    "Multiple",
    "Noise",
    "Noise Oscillator",
    "Mixer VCA",
    "Quantizer",
    "Blank Panel",
];

fn rack(modules: &[(&str, &str)]) -> RackSnapshot {
    RackSnapshot::new(
        modules
            .iter()
            .map(|(id, ty)| ModuleRef::new(*id, *ty))
            .collect(),
    )
}

/// Oscillator and amplifier only. Produces a single drone voice.
pub fn minimal_voice_rack() -> RackSnapshot {
    rack(&[("O1", "Oscillator"), ("A1", "Amplifier")])
}

/// A complete subtractive voice with one LFO.
pub fn voice_rack() -> RackSnapshot {
    rack(&[
        ("O1", "VCO"),
        ("F1", "VCF"),
        ("A1", "VCA"),
        ("E1", "ADSR"),
        ("L1", "LFO"),
    ])
}

/// Sequencer, oscillator and two LFOs.
pub fn generative_rack() -> RackSnapshot {
    rack(&[
        ("SQ1", "Sequencer"),
        ("O1", "Oscillator"),
        ("L1", "LFO"),
        ("L2", "LFO"),
    ])
}

/// Noise voice triggered by a clocked sequencer.
pub fn drum_rack() -> RackSnapshot {
    rack(&[
        ("N1", "Noise"),
        ("F1", "VCF"),
        ("A1", "VCA"),
        ("E1", "ADSR"),
        ("C1", "Clock Sequencer"),
    ])
}

/// Mixer feeding two effects, with an LFO.
pub fn fx_rack() -> RackSnapshot {
    rack(&[
        ("M1", "Mixer"),
        ("R1", "Reverb"),
        ("D1", "Delay"),
        ("L1", "LFO"),
    ])
}

/// A rack that satisfies every archetype.
pub fn full_rack() -> RackSnapshot {
    rack(&[
        ("O1", "VCO"),
        ("O2", "Wavetable Oscillator"),
        ("F1", "VCF"),
        ("A1", "VCA"),
        ("E1", "ADSR"),
        ("L1", "LFO"),
        ("L2", "LFO"),
        ("SQ1", "Sequencer"),
        ("N1", "Noise"),
        ("M1", "Mixer"),
        ("R1", "Reverb"),
    ])
}

/// Every named fixture, in a stable order.
pub fn all_fixtures() -> Vec<(&'static str, RackSnapshot)> {
    vec![
        ("minimal_voice", minimal_voice_rack()),
        ("voice", voice_rack()),
        ("generative", generative_rack()),
        ("drum", drum_rack()),
        ("fx", fx_rack()),
        ("full", full_rack()),
    ]
}

/// Writes `rack` as pretty JSON to `dir/<name>.json` and returns the path.
pub fn write_rack(dir: &Path, name: &str, rack: &RackSnapshot) -> PathBuf {
    let path = dir.join(format!("{}.json", name));
    let json = rack.to_json_pretty().expect("Failed to serialize rack");
    fs::write(&path, json).expect("Failed to write rack file");
    path
}

/// Writes `config` as JSON to `dir/<name>.json` and returns the path.
pub fn write_config(dir: &Path, name: &str, config: &PatchEngineConfig) -> PathBuf {
    let path = dir.join(format!("{}.json", name));
    let json = config.to_json().expect("Failed to serialize config");
    fs::write(&path, json).expect("Failed to write config file");
    path
}
