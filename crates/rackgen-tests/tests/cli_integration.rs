//! CLI integration tests: rack and config files on disk through the commands.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p rackgen-tests --test cli_integration
//! ```

use std::process::ExitCode;

use rackgen_cli::commands;
use rackgen_cli::commands::generate::GenerateOptions;
use rackgen_engine::{generate_patches, ENGINE_VERSION, NAMING_VERSION};
use rackgen_spec::{GenerationIr, PatchEngineConfig, RackSnapshot};
use rackgen_tests::fixtures;
use rackgen_tests::harness::TestHarness;

#[test]
fn test_generate_every_fixture_from_file() {
    let harness = TestHarness::new();
    for (name, rack) in fixtures::all_fixtures() {
        let path = harness.write_rack(name, &rack);
        for json in [false, true] {
            let code = harness.generate(&GenerateOptions {
                rack_path: &path,
                json,
                ..Default::default()
            });
            assert_eq!(code, ExitCode::SUCCESS, "fixture {}", name);
        }
    }
}

#[test]
fn test_file_round_trip_matches_library() {
    let harness = TestHarness::new();
    let rack = fixtures::full_rack();
    let path = harness.write_rack("full", &rack);

    let from_file = harness.generate_result(&path, None, Some(9), false).unwrap();
    let direct = generate_patches(&rack, 9, &PatchEngineConfig::default()).unwrap();
    assert_eq!(from_file.patches, direct);
    assert_eq!(from_file.seed, 9);
}

#[test]
fn test_config_file_caps_output() {
    let harness = TestHarness::new();
    let rack_path = harness.write_rack("full", &fixtures::full_rack());
    let config_path =
        harness.write_config("config", &PatchEngineConfig::default().with_max_patches(1));

    let result = harness
        .generate_result(&rack_path, Some(&config_path), None, false)
        .unwrap();
    assert_eq!(result.patches.len(), 1);
    assert_eq!(result.seed, rackgen_spec::DEFAULT_SEED);
}

#[test]
fn test_empty_rack_succeeds_with_no_patches() {
    let harness = TestHarness::new();
    let path = harness.write_rack("empty", &RackSnapshot::empty());

    let code = harness.generate(&GenerateOptions {
        rack_path: &path,
        ..Default::default()
    });
    assert_eq!(code, ExitCode::SUCCESS);
    assert!(harness
        .generate_result(&path, None, None, false)
        .unwrap()
        .patches
        .is_empty());
}

#[test]
fn test_invalid_config_fails_generate() {
    let harness = TestHarness::new();
    let rack_path = harness.write_rack("voice", &fixtures::voice_rack());
    let config_path = harness.write_raw("config.json", r#"{"max_patches": -1}"#);

    for json in [false, true] {
        let code = harness.generate(&GenerateOptions {
            rack_path: &rack_path,
            config_path: Some(&config_path),
            json,
            ..Default::default()
        });
        assert_eq!(code, ExitCode::FAILURE);
    }

    let negative_flag = harness.generate(&GenerateOptions {
        rack_path: &rack_path,
        max_patches: Some(-1),
        json: true,
        ..Default::default()
    });
    assert_eq!(negative_flag, ExitCode::from(1));
}

#[test]
fn test_malformed_rack_file() {
    let harness = TestHarness::new();
    let path = harness.write_raw("broken.json", r#"{"modules": [{"id": "O1"}]}"#);

    assert_eq!(harness.validate(&path, None, false), ExitCode::FAILURE);
    assert_eq!(harness.validate(&path, None, true), ExitCode::from(1));
    assert!(harness.generate_result(&path, None, None, false).is_err());
}

#[test]
fn test_validate_and_analyze_fixtures() {
    let harness = TestHarness::new();
    for (name, rack) in fixtures::all_fixtures() {
        let path = harness.write_rack(name, &rack);
        assert_eq!(harness.validate(&path, None, true), ExitCode::SUCCESS);
        assert_eq!(harness.analyze(&path, false), ExitCode::SUCCESS);
        assert_eq!(harness.analyze(&path, true), ExitCode::SUCCESS);
    }
}

#[test]
fn test_hash_command_matches_ir() {
    let harness = TestHarness::new();
    let rack = fixtures::voice_rack();
    let path = harness.write_rack("voice", &rack);

    let from_cli = commands::hash::content_hash(&path, Some(3), None, None).unwrap();
    let ir = GenerationIr::build(&rack, &PatchEngineConfig::default(), 3, ENGINE_VERSION);
    assert_eq!(from_cli, ir.content_hash().unwrap());
}

#[test]
fn test_hash_command_matches_capped_provenance() {
    let harness = TestHarness::new();
    let rack_path = harness.write_rack("full", &fixtures::full_rack());
    let config_path =
        harness.write_config("capped", &PatchEngineConfig::default().with_max_patches(2));

    let generated = harness
        .generate_result(&rack_path, Some(&config_path), Some(5), true)
        .unwrap();
    let provenance = generated.provenance.unwrap();

    let from_flag = commands::hash::content_hash(&rack_path, Some(5), None, Some(2)).unwrap();
    let from_file =
        commands::hash::content_hash(&rack_path, Some(5), Some(&config_path), None).unwrap();
    assert_eq!(from_flag, provenance.content_hash);
    assert_eq!(from_file, provenance.content_hash);
}

#[test]
fn test_hash_command_rejects_invalid_config() {
    let harness = TestHarness::new();
    let rack_path = harness.write_rack("voice", &fixtures::voice_rack());
    let config_path = harness.write_raw("bad.json", r#"{"max_patches": 500}"#);

    assert!(commands::hash::content_hash(&rack_path, None, Some(&config_path), None).is_err());
    assert!(commands::hash::content_hash(&rack_path, None, None, Some(-3)).is_err());
}

#[test]
fn test_provenance_from_file_matches_ir() {
    let harness = TestHarness::new();
    let path = harness.write_rack("drum", &fixtures::drum_rack());

    let result = harness.generate_result(&path, None, Some(12), true).unwrap();
    let ir = result.ir.as_ref().unwrap();
    let provenance = result.provenance.as_ref().unwrap();
    assert!(provenance.matches(ir));
    assert_eq!(provenance.naming_version, NAMING_VERSION);
    assert_eq!(provenance.engine_version, ENGINE_VERSION);
}

#[test]
fn test_name_command_versions() {
    assert_eq!(
        commands::name::run(42, "Voice", None).unwrap(),
        ExitCode::SUCCESS
    );
    assert_eq!(
        commands::name::resolve(42, "Voice", Some(NAMING_VERSION)).unwrap(),
        rackgen_engine::deterministic_name(42, "Voice")
    );
    assert!(commands::name::resolve(42, "Voice", Some(NAMING_VERSION + 1)).is_err());
}
