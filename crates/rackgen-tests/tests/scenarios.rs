//! Behavioral scenarios for the patch engine.
//!
//! Each test drives the public library API the way an embedding application
//! would: build a rack, pick a seed, read the patches back.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p rackgen-tests --test scenarios
//! ```

use std::collections::HashSet;

use rackgen_engine::{
    analyze, deterministic_name, generate, generate_patches, Archetype, EngineError,
    GenerationRequest, NameKey, Role,
};
use rackgen_spec::{
    CableType, Category, EnvelopeTimingClass, ModuleRef, PatchEngineConfig, RackSnapshot,
    WaveformFamily,
};
use rackgen_tests::fixtures;

fn rack(modules: &[(&str, &str)]) -> RackSnapshot {
    RackSnapshot::new(
        modules
            .iter()
            .map(|(id, ty)| ModuleRef::new(*id, *ty))
            .collect(),
    )
}

// ============================================================================
// Core scenarios
// ============================================================================

#[test]
fn scenario_oscillator_and_amplifier_make_one_voice() {
    let patches = generate_patches(
        &rack(&[("O1", "oscillator"), ("A1", "amplifier")]),
        42,
        &PatchEngineConfig::default(),
    )
    .unwrap();

    assert_eq!(patches.len(), 1);
    assert!(matches!(
        patches[0].category,
        Category::Lead | Category::Bass | Category::Pad | Category::Drone
    ));
    assert!(patches[0].has_link("O1", "A1", CableType::Audio));
}

#[test]
fn scenario_empty_rack_yields_nothing() {
    let patches =
        generate_patches(&RackSnapshot::empty(), 42, &PatchEngineConfig::default()).unwrap();
    assert!(patches.is_empty());
}

#[test]
fn scenario_sequencer_and_two_lfos_make_generative_patch() {
    let patches = generate_patches(
        &fixtures::generative_rack(),
        7,
        &PatchEngineConfig::default(),
    )
    .unwrap();

    let generative = patches
        .iter()
        .find(|p| p.category == Category::Generative)
        .expect("a generative patch");
    assert!(generative.has_link("SQ1", "O1", CableType::Cv));
    assert!(generative
        .connections
        .iter()
        .any(|c| c.from_module_id == "SQ1" && c.from_port == "pitch" && c.to_port == "pitch"));

    let sources: HashSet<&str> = generative
        .connections
        .iter()
        .map(|c| c.from_module_id.as_str())
        .collect();
    assert!(sources.contains("L1"));
    assert!(sources.contains("L2"));
}

#[test]
fn scenario_names_are_stable_and_seed_sensitive() {
    let first = deterministic_name(42, "Voice");
    let second = deterministic_name(42, "Voice");
    assert_eq!(first, second);
    assert_eq!(first.split(' ').count(), 2);

    let differs = (0..100u64)
        .filter(|s| *s != 42)
        .any(|s| deterministic_name(s, "Voice") != first);
    assert!(differs);
}

#[test]
fn scenario_names_can_repeat_within_a_run() {
    let patches =
        generate_patches(&fixtures::full_rack(), 1, &PatchEngineConfig::default()).unwrap();
    assert_eq!(patches.len(), 4);
    assert!(patches.iter().all(|p| p.name == "Echo Haze"));

    let categories: HashSet<Category> = patches.iter().map(|p| p.category).collect();
    assert_eq!(categories.len(), 4);
}

// ============================================================================
// Archetype behavior
// ============================================================================

#[test]
fn test_archetypes_emitted_in_fixed_order() {
    let patches =
        generate_patches(&fixtures::full_rack(), 42, &PatchEngineConfig::default()).unwrap();
    let categories: Vec<Category> = patches.iter().map(|p| p.category).collect();

    assert_eq!(categories.len(), Archetype::ORDER.len());
    assert!(matches!(
        categories[0],
        Category::Lead | Category::Bass | Category::Pad
    ));
    assert_eq!(
        &categories[1..],
        &[Category::Generative, Category::ClockRhythm, Category::TextureFx]
    );
}

#[test]
fn test_cap_truncates_from_the_end() {
    let rack = fixtures::full_rack();
    let all = generate_patches(&rack, 11, &PatchEngineConfig::default()).unwrap();

    for cap in 0..=all.len() {
        let config = PatchEngineConfig::default().with_max_patches(cap as i64);
        let capped = generate_patches(&rack, 11, &config).unwrap();
        assert_eq!(capped.as_slice(), &all[..cap]);
    }
}

#[test]
fn test_voice_without_envelope_is_drone() {
    for seed in 0..32 {
        let patches = generate_patches(
            &rack(&[("O1", "VCO"), ("F1", "VCF"), ("A1", "VCA")]),
            seed,
            &PatchEngineConfig::default(),
        )
        .unwrap();
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].category, Category::Drone);
        assert_eq!(
            patches[0].waveform.envelope_timing_class,
            EnvelopeTimingClass::Gated
        );
    }
}

#[test]
fn test_rhythmic_patch_is_noisy_and_percussive() {
    let patches =
        generate_patches(&fixtures::drum_rack(), 42, &PatchEngineConfig::default()).unwrap();
    let hit = patches
        .iter()
        .find(|p| p.category == Category::ClockRhythm)
        .expect("a rhythmic patch");

    assert_eq!(hit.waveform.waveform_family, WaveformFamily::Noise);
    assert_eq!(
        hit.waveform.envelope_timing_class,
        EnvelopeTimingClass::Percussive
    );
    assert!(hit.waveform.noise_mix);
    assert!(hit.has_link("C1", "E1", CableType::Gate));
    assert!(hit.description.contains("short-decay"));
}

#[test]
fn test_processing_chain_prefers_mixer_source() {
    for seed in 0..16 {
        let patches =
            generate_patches(&fixtures::fx_rack(), seed, &PatchEngineConfig::default()).unwrap();
        assert_eq!(patches.len(), 1);
        let chain = &patches[0];
        assert_eq!(chain.category, Category::TextureFx);
        assert_eq!(chain.connections[0].from_module_id, "M1");
        assert_eq!(chain.connections[0].cable_type, CableType::Audio);
    }
}

#[test]
fn test_single_role_racks_yield_nothing() {
    let config = PatchEngineConfig::default();
    for ty in ["VCO", "VCF", "VCA", "LFO", "Reverb", "Blank Panel"] {
        let single = rack(&[("X1", ty)]);
        assert!(generate_patches(&single, 42, &config).unwrap().is_empty());
    }
    let unclassified = rack(&[("P1", "Blank Panel"), ("P2", "Blank Panel")]);
    assert!(generate_patches(&unclassified, 42, &config).unwrap().is_empty());
}

#[test]
fn test_multi_role_module_used_once_per_patch() {
    let rack = rack(&[("O1", "VCO"), ("MA1", "Mixer VCA"), ("R1", "Reverb")]);
    let roles = analyze(&rack);
    assert_eq!(roles.roles_of("MA1"), &[Role::Amplifier, Role::Mixer]);

    for seed in 0..16 {
        for patch in generate_patches(&rack, seed, &PatchEngineConfig::default()).unwrap() {
            for conn in &patch.connections {
                assert_ne!(conn.from_module_id, conn.to_module_id);
            }
        }
    }
}

// ============================================================================
// Errors and naming keys
// ============================================================================

#[test]
fn test_invalid_inputs_rejected_without_output() {
    let rack = fixtures::voice_rack();
    let config = PatchEngineConfig::default().with_max_patches(-3);
    let negative = generate_patches(&rack, 42, &config);
    assert!(matches!(negative, Err(EngineError::InvalidConfiguration(_))));

    let duplicate = rack.clone().with_module(ModuleRef::new("O1", "VCO"));
    let result = generate(&GenerationRequest::new(&duplicate).with_provenance());
    assert!(matches!(result, Err(EngineError::InvalidRack(_))));
}

#[test]
fn test_persisted_name_key_reproduces_patch_name() {
    let patches =
        generate_patches(&fixtures::full_rack(), 77, &PatchEngineConfig::default()).unwrap();
    for patch in patches {
        let key = NameKey {
            naming_version: patch.naming_version,
            seed: patch.generation_seed,
            category: patch.category.to_string(),
        };
        assert_eq!(key.resolve().unwrap(), patch.name);
    }
}
