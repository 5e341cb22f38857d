use super::*;
use crate::rng::create_rng;
use pretty_assertions::assert_eq;
use rackgen_spec::{CableType, Category, ErrorCode, ModuleRef};

fn rack(modules: &[(&str, &str)]) -> RackSnapshot {
    RackSnapshot::new(
        modules
            .iter()
            .map(|(id, ty)| ModuleRef::new(*id, *ty))
            .collect(),
    )
}

fn full_rack() -> RackSnapshot {
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

#[test]
fn test_voice_rack_yields_one_patch() {
    let rack = rack(&[("O1", "Oscillator"), ("A1", "Amplifier")]);
    let patches = generate_patches(&rack, 42, &PatchEngineConfig::default()).unwrap();

    assert_eq!(patches.len(), 1);
    let patch = &patches[0];
    assert!(matches!(
        patch.category,
        Category::Lead | Category::Bass | Category::Pad | Category::Drone
    ));
    assert!(patch.has_link("O1", "A1", CableType::Audio));
    assert_eq!(patch.generation_seed, 42);
    assert_eq!(patch.naming_version, NAMING_VERSION);
    assert_eq!(patch.name, deterministic_name(42, patch.category.as_str()));
}

#[test]
fn test_empty_rack_yields_nothing() {
    let patches =
        generate_patches(&RackSnapshot::empty(), 42, &PatchEngineConfig::default()).unwrap();
    assert!(patches.is_empty());
}

#[test]
fn test_generative_scenario() {
    let rack = rack(&[
        ("SQ1", "Sequencer"),
        ("O1", "Oscillator"),
        ("L1", "LFO"),
        ("L2", "LFO"),
    ]);
    let patches = generate_patches(&rack, 7, &PatchEngineConfig::default()).unwrap();

    assert_eq!(patches.len(), 1);
    let patch = &patches[0];
    assert_eq!(patch.category, Category::Generative);
    assert!(patch.has_link("SQ1", "O1", CableType::Cv));
    let pitch = patch
        .connections
        .iter()
        .find(|c| c.links("SQ1", "O1"))
        .unwrap();
    assert_eq!(pitch.from_port, "pitch");
    assert_eq!(pitch.to_port, "pitch");

    let ids = patch.module_ids();
    assert!(ids.contains(&"L1"));
    assert!(ids.contains(&"L2"));
}

#[test]
fn test_deterministic_output() {
    let rack = full_rack();
    let config = PatchEngineConfig::default();
    let a = generate_patches(&rack, 1234, &config).unwrap();
    let b = generate_patches(&rack, 1234, &config).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_seed_changes_output() {
    let rack = full_rack();
    let config = PatchEngineConfig::default();
    let base = generate_patches(&rack, 0, &config).unwrap();
    let differs = (1..32u64).any(|seed| generate_patches(&rack, seed, &config).unwrap() != base);
    assert!(differs);
}

#[test]
fn test_full_rack_emits_every_archetype_in_order() {
    let patches = generate_patches(&full_rack(), 99, &PatchEngineConfig::default()).unwrap();
    assert_eq!(patches.len(), 4);

    assert!(matches!(
        patches[0].category,
        Category::Lead | Category::Bass | Category::Pad
    ));
    assert_eq!(patches[1].category, Category::Generative);
    assert_eq!(patches[2].category, Category::ClockRhythm);
    assert_eq!(patches[3].category, Category::TextureFx);
}

#[test]
fn test_cap_truncates_later_archetypes() {
    let rack = full_rack();
    let all = generate_patches(&rack, 5, &PatchEngineConfig::default()).unwrap();

    for cap in 0..=4 {
        let config = PatchEngineConfig::default().with_max_patches(cap);
        let capped = generate_patches(&rack, 5, &config).unwrap();
        assert_eq!(capped.len(), cap as usize);
        assert_eq!(capped[..], all[..cap as usize]);
    }
}

#[test]
fn test_negative_cap_is_rejected() {
    let config = PatchEngineConfig::default().with_max_patches(-1);
    let err = generate_patches(&full_rack(), 42, &config).unwrap_err();

    assert!(matches!(err, EngineError::InvalidConfiguration(_)));
    assert_eq!(
        err.validation_errors()[0].code,
        ErrorCode::NegativeMaxPatches
    );
}

#[test]
fn test_oversized_cap_is_rejected() {
    let config = PatchEngineConfig::default().with_max_patches(10_000);
    let err = generate_patches(&full_rack(), 42, &config).unwrap_err();
    assert!(matches!(err, EngineError::InvalidConfiguration(_)));
}

#[test]
fn test_duplicate_ids_are_rejected() {
    let rack = rack(&[("O1", "VCO"), ("O1", "VCA")]);
    let err = generate_patches(&rack, 42, &PatchEngineConfig::default()).unwrap_err();
    assert!(matches!(err, EngineError::InvalidRack(_)));
}

#[test]
fn test_single_role_module_yields_nothing() {
    for ty in ["VCO", "VCF", "VCA", "ADSR", "LFO", "Sequencer", "Noise", "Mixer", "Reverb"] {
        let rack = rack(&[("X1", ty)]);
        let patches = generate_patches(&rack, 42, &PatchEngineConfig::default()).unwrap();
        assert!(patches.is_empty(), "{} alone produced a patch", ty);
    }
}

#[test]
fn test_unclassified_rack_yields_nothing() {
    let rack = rack(&[("X1", "Blinkenlights"), ("X2", "Blank Panel")]);
    let patches = generate_patches(&rack, 42, &PatchEngineConfig::default()).unwrap();
    assert!(patches.is_empty());
}

#[test]
fn test_connections_reference_rack_modules() {
    let rack = full_rack();
    for seed in 0..50u64 {
        for patch in generate_patches(&rack, seed, &PatchEngineConfig::default()).unwrap() {
            assert!(!patch.connections.is_empty());
            for conn in &patch.connections {
                assert!(rack.contains(&conn.from_module_id));
                assert!(rack.contains(&conn.to_module_id));
                assert_ne!(conn.from_module_id, conn.to_module_id);
            }
        }
    }
}

#[test]
fn test_injected_rng_matches_seeded_call() {
    let rack = full_rack();
    let config = PatchEngineConfig::default();
    let mut rng = create_rng(77);
    let injected = generate_with_rng(&rack, 77, &config, &mut rng).unwrap();
    assert_eq!(injected, generate_patches(&rack, 77, &config).unwrap());
}

#[test]
fn test_waveform_follows_wiring() {
    let rack = rack(&[("N1", "Noise"), ("A1", "VCA"), ("E1", "ADSR")]);
    let patches = generate_patches(&rack, 3, &PatchEngineConfig::default()).unwrap();

    assert_eq!(patches.len(), 1);
    let patch = &patches[0];
    assert_eq!(patch.category, Category::ClockRhythm);
    assert_eq!(
        patch.waveform,
        infer_waveform(Category::ClockRhythm, false, true)
    );
}

#[test]
fn test_check_connections_flags_unknown_module() {
    let rack = rack(&[("O1", "VCO"), ("A1", "VCA")]);
    let bad = vec![Connection::new("O1", "out", "Z9", "in", CableType::Audio)];
    let err = check_connections(&rack, Archetype::SubtractiveVoice, &bad).unwrap_err();
    assert!(matches!(err, EngineError::InvariantViolation { .. }));
    assert!(err.to_string().contains("Z9"));
}

#[test]
fn test_check_connections_flags_self_loop() {
    let rack = rack(&[("O1", "VCO"), ("A1", "VCA")]);
    let bad = vec![Connection::new("O1", "out", "O1", "fm", CableType::Cv)];
    let err = check_connections(&rack, Archetype::Generative, &bad).unwrap_err();
    assert!(err.to_string().contains("loops back"));
}

#[test]
fn test_request_defaults() {
    let rack = rack(&[("O1", "VCO"), ("A1", "VCA")]);
    let request = GenerationRequest::new(&rack);
    assert_eq!(request.seed(), DEFAULT_SEED);
    assert_eq!(request.config(), PatchEngineConfig::default());

    let result = generate(&request).unwrap();
    assert_eq!(result.seed, DEFAULT_SEED);
    assert!(result.ir.is_none());
    assert!(result.provenance.is_none());
    assert_eq!(
        result.patches,
        generate_patches(&rack, DEFAULT_SEED, &PatchEngineConfig::default()).unwrap()
    );
}

#[test]
fn test_request_with_provenance() {
    let rack = full_rack();
    let request = GenerationRequest::new(&rack)
        .with_seed(8)
        .with_config(PatchEngineConfig::default().with_max_patches(2))
        .with_provenance();
    let result = generate(&request).unwrap();

    let ir = result.ir.unwrap();
    let provenance = result.provenance.unwrap();
    assert_eq!(ir.seed, 8);
    assert_eq!(ir.engine_version, ENGINE_VERSION);
    assert_eq!(ir.config.max_patches, 2);
    assert!(provenance.matches(&ir));
    assert_eq!(provenance.naming_version, NAMING_VERSION);
    assert_eq!(result.patches.len(), 2);
}

#[test]
fn test_provenance_does_not_change_patches() {
    let rack = full_rack();
    let plain = generate(&GenerationRequest::new(&rack).with_seed(21)).unwrap();
    let traced = generate(&GenerationRequest::new(&rack).with_seed(21).with_provenance()).unwrap();
    assert_eq!(plain.patches, traced.patches);
}
