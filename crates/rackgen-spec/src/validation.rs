//! Rack and configuration validation.
//!
//! Validation runs before any generation work. Errors reject the call with
//! no partial output; warnings are informational.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::config::{PatchEngineConfig, MAX_PATCHES_LIMIT};
use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::rack::RackSnapshot;

/// Regex pattern for valid module ids.
/// Format: starts with an ASCII letter or digit, followed by up to 63 letters,
/// digits, underscores, dots, colons, or hyphens.
const MODULE_ID_PATTERN: &str = r"^[A-Za-z0-9][A-Za-z0-9_.:-]{0,63}$";

static MODULE_ID_REGEX: OnceLock<Regex> = OnceLock::new();

fn module_id_regex() -> &'static Regex {
    MODULE_ID_REGEX.get_or_init(|| Regex::new(MODULE_ID_PATTERN).expect("invalid regex pattern"))
}

/// Checks if a module id is valid.
///
/// # Example
/// ```
/// use rackgen_spec::validation::is_valid_module_id;
///
/// assert!(is_valid_module_id("VCO-1"));
/// assert!(!is_valid_module_id("-bad"));
/// assert!(!is_valid_module_id(""));
/// ```
pub fn is_valid_module_id(id: &str) -> bool {
    module_id_regex().is_match(id)
}

/// Validates an engine configuration.
pub fn validate_config(config: &PatchEngineConfig) -> ValidationResult {
    let mut result = ValidationResult::success();

    if config.max_patches < 0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::NegativeMaxPatches,
            format!("max_patches must be >= 0, got {}", config.max_patches),
            "max_patches",
        ));
    } else if config.max_patches > MAX_PATCHES_LIMIT {
        result.add_error(ValidationError::with_path(
            ErrorCode::MaxPatchesTooLarge,
            format!(
                "max_patches must be <= {}, got {}",
                MAX_PATCHES_LIMIT, config.max_patches
            ),
            "max_patches",
        ));
    }

    if config.allow_feedback {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::ReservedOption,
            "allow_feedback is reserved and currently has no effect",
            "allow_feedback",
        ));
    }
    if config.prefer_simple {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::ReservedOption,
            "prefer_simple is reserved and currently has no effect",
            "prefer_simple",
        ));
    }

    result
}

/// Validates a rack snapshot.
///
/// Module ids must be well formed and unique so that every generated
/// connection resolves to exactly one module.
pub fn validate_rack(rack: &RackSnapshot) -> ValidationResult {
    let mut result = ValidationResult::success();
    let mut seen: HashSet<&str> = HashSet::new();

    for (i, module) in rack.modules.iter().enumerate() {
        let path = format!("modules[{}]", i);

        if module.id.is_empty() {
            result.add_error(ValidationError::with_path(
                ErrorCode::EmptyModuleId,
                "module id must not be empty",
                format!("{}.id", path),
            ));
        } else if !is_valid_module_id(&module.id) {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidModuleId,
                format!(
                    "module id must match pattern '{}', got '{}'",
                    MODULE_ID_PATTERN, module.id
                ),
                format!("{}.id", path),
            ));
        } else if !seen.insert(module.id.as_str()) {
            result.add_error(ValidationError::with_path(
                ErrorCode::DuplicateModuleId,
                format!("duplicate module id '{}'", module.id),
                format!("{}.id", path),
            ));
        }

        if module.module_type.trim().is_empty() {
            result.add_error(ValidationError::with_path(
                ErrorCode::EmptyModuleType,
                format!("module '{}' has an empty type", module.id),
                format!("{}.type", path),
            ));
        }

        let mut tags: HashSet<String> = HashSet::new();
        for tag in &module.tags {
            if !tags.insert(tag.to_lowercase()) {
                result.add_warning(ValidationWarning::with_path(
                    WarningCode::DuplicateTag,
                    format!(
                        "module '{}' declares tag '{}' more than once",
                        module.id, tag
                    ),
                    format!("{}.tags", path),
                ));
            }
        }
    }

    if rack.len() < 2 {
        result.add_warning(ValidationWarning::new(
            WarningCode::SparseRack,
            format!(
                "rack has {} module(s); at least two are needed to form a patch",
                rack.len()
            ),
        ));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rack::ModuleRef;

    #[test]
    fn test_default_config_is_valid() {
        let result = validate_config(&PatchEngineConfig::default());
        assert!(result.is_ok());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_negative_max_patches_rejected() {
        let config = PatchEngineConfig::default().with_max_patches(-3);
        let result = validate_config(&config);
        assert!(!result.is_ok());
        assert_eq!(result.errors[0].code, ErrorCode::NegativeMaxPatches);
        assert_eq!(result.errors[0].path.as_deref(), Some("max_patches"));
    }

    #[test]
    fn test_max_patches_bounds() {
        assert!(validate_config(&PatchEngineConfig::default().with_max_patches(0)).is_ok());
        assert!(
            validate_config(&PatchEngineConfig::default().with_max_patches(MAX_PATCHES_LIMIT))
                .is_ok()
        );
        let result =
            validate_config(&PatchEngineConfig::default().with_max_patches(MAX_PATCHES_LIMIT + 1));
        assert_eq!(result.errors[0].code, ErrorCode::MaxPatchesTooLarge);
    }

    #[test]
    fn test_reserved_options_warn() {
        let config = PatchEngineConfig {
            allow_feedback: true,
            prefer_simple: true,
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(result.is_ok());
        assert_eq!(result.warnings.len(), 2);
        assert!(result
            .warnings
            .iter()
            .all(|w| w.code == WarningCode::ReservedOption));
    }

    #[test]
    fn test_valid_rack() {
        let rack = RackSnapshot::new(vec![
            ModuleRef::new("O1", "VCO"),
            ModuleRef::new("A1", "VCA"),
        ]);
        let result = validate_rack(&rack);
        assert!(result.is_ok());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_duplicate_module_id_rejected() {
        let rack = RackSnapshot::new(vec![
            ModuleRef::new("O1", "VCO"),
            ModuleRef::new("O1", "VCA"),
        ]);
        let result = validate_rack(&rack);
        assert!(!result.is_ok());
        assert_eq!(result.errors[0].code, ErrorCode::DuplicateModuleId);
        assert_eq!(result.errors[0].path.as_deref(), Some("modules[1].id"));
    }

    #[test]
    fn test_bad_module_ids_rejected() {
        let rack = RackSnapshot::new(vec![
            ModuleRef::new("", "VCO"),
            ModuleRef::new("has space", "VCA"),
            ModuleRef::new("F1", "  "),
        ]);
        let result = validate_rack(&rack);
        let codes: Vec<ErrorCode> = result.errors.iter().map(|e| e.code).collect();
        assert_eq!(
            codes,
            vec![
                ErrorCode::EmptyModuleId,
                ErrorCode::InvalidModuleId,
                ErrorCode::EmptyModuleType
            ]
        );
    }

    #[test]
    fn test_sparse_rack_warns_but_passes() {
        let result = validate_rack(&RackSnapshot::empty());
        assert!(result.is_ok());
        assert_eq!(result.warnings[0].code, WarningCode::SparseRack);
    }

    #[test]
    fn test_duplicate_tag_warns() {
        let rack = RackSnapshot::new(vec![
            ModuleRef::new("O1", "VCO").tag("Analog").tag("analog"),
            ModuleRef::new("A1", "VCA"),
        ]);
        let result = validate_rack(&rack);
        assert!(result.is_ok());
        assert_eq!(result.warnings[0].code, WarningCode::DuplicateTag);
    }

    #[test]
    fn test_module_id_pattern() {
        assert!(is_valid_module_id("O1"));
        assert!(is_valid_module_id("mod:vco.2_a-b"));
        assert!(!is_valid_module_id("_leading"));
        assert!(!is_valid_module_id(&"x".repeat(65)));
        assert!(is_valid_module_id(&"x".repeat(64)));
    }
}
