//! Main entry point for patch generation.
//!
//! This module takes a rack snapshot, seed and config and produces patches
//! deterministically, optionally with the generation IR and provenance.

#[cfg(test)]
mod tests;

use rackgen_spec::{
    validate_config, validate_rack, Connection, GenerationIr, PatchEngineConfig, PatchSpec,
    Provenance, RackSnapshot, DEFAULT_SEED,
};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::analyzer::{analyze, Role, RoleMap};
use crate::archetype::{Archetype, PatchDraft};
use crate::error::{EngineError, EngineResult};
use crate::naming::{deterministic_name, NAMING_VERSION};
use crate::rng::create_rng;
use crate::waveform::infer_waveform;

/// Engine version.
///
/// Bumped whenever the archetype draw order changes, since that changes the
/// output for an unchanged (rack, seed, config).
pub const ENGINE_VERSION: &str = "1.1.0";

/// Inputs to one generation call.
#[derive(Debug, Clone)]
pub struct GenerationRequest<'a> {
    /// Rack to patch.
    pub rack: &'a RackSnapshot,
    /// Seed (defaults to [`DEFAULT_SEED`]).
    pub seed: Option<u64>,
    /// Configuration (defaults to [`PatchEngineConfig::default`]).
    pub config: Option<PatchEngineConfig>,
    /// Also build the IR and provenance record.
    pub with_provenance: bool,
}

impl<'a> GenerationRequest<'a> {
    /// Creates a request with default seed and config and no provenance.
    pub fn new(rack: &'a RackSnapshot) -> Self {
        Self {
            rack,
            seed: None,
            config: None,
            with_provenance: false,
        }
    }

    /// Sets the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the config.
    pub fn with_config(mut self, config: PatchEngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Requests the IR and provenance record.
    pub fn with_provenance(mut self) -> Self {
        self.with_provenance = true;
        self
    }

    /// Effective seed.
    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    /// Effective config.
    pub fn config(&self) -> PatchEngineConfig {
        self.config.clone().unwrap_or_default()
    }
}

/// Result of patch generation.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateResult {
    /// Seed the patches were generated with.
    pub seed: u64,
    /// Generated patches, in archetype order.
    pub patches: Vec<PatchSpec>,
    /// Generation IR (if requested).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ir: Option<GenerationIr>,
    /// Provenance record (if requested).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provenance: Option<Provenance>,
}

/// Generates patches for a request.
///
/// # Arguments
/// * `request` - Rack, seed, config and provenance flag
///
/// # Returns
/// The patches, plus the IR and provenance when requested
pub fn generate(request: &GenerationRequest<'_>) -> EngineResult<GenerateResult> {
    let seed = request.seed();
    let config = request.config();

    let mut rng = create_rng(seed);
    let patches = generate_with_rng(request.rack, seed, &config, &mut rng)?;

    let (ir, provenance) = if request.with_provenance {
        let ir = GenerationIr::build(request.rack, &config, seed, ENGINE_VERSION);
        let provenance = Provenance::builder(&ir)
            .naming_version(NAMING_VERSION)
            .build()?;
        (Some(ir), Some(provenance))
    } else {
        (None, None)
    };

    info!(
        seed,
        modules = request.rack.len(),
        patches = patches.len(),
        "generation complete"
    );

    Ok(GenerateResult {
        seed,
        patches,
        ir,
        provenance,
    })
}

/// Generates patches with default provenance settings (none).
///
/// # Example
/// ```
/// use rackgen_engine::generate_patches;
/// use rackgen_spec::{ModuleRef, PatchEngineConfig, RackSnapshot};
///
/// let rack = RackSnapshot::new(vec![
///     ModuleRef::new("O1", "VCO"),
///     ModuleRef::new("A1", "VCA"),
/// ]);
/// let patches = generate_patches(&rack, 42, &PatchEngineConfig::default()).unwrap();
/// assert_eq!(patches.len(), 1);
/// ```
pub fn generate_patches(
    rack: &RackSnapshot,
    seed: u64,
    config: &PatchEngineConfig,
) -> EngineResult<Vec<PatchSpec>> {
    let mut rng = create_rng(seed);
    generate_with_rng(rack, seed, config, &mut rng)
}

/// Generates patches drawing from a caller-supplied RNG.
///
/// `seed` is recorded on each patch and feeds the names; every other random
/// choice comes from `rng`. Inputs are validated before any draw is made.
pub fn generate_with_rng<R: Rng + ?Sized>(
    rack: &RackSnapshot,
    seed: u64,
    config: &PatchEngineConfig,
    rng: &mut R,
) -> EngineResult<Vec<PatchSpec>> {
    check_inputs(rack, config)?;

    let cap = config.patch_cap();
    if cap == 0 || rack.len() < 2 {
        debug!(cap, modules = rack.len(), "nothing to generate");
        return Ok(Vec::new());
    }

    let roles = analyze(rack);
    let mut patches = Vec::new();

    for archetype in Archetype::ORDER {
        if patches.len() >= cap {
            debug!(cap, %archetype, "patch cap reached");
            break;
        }
        if !archetype.is_feasible(&roles) {
            debug!(%archetype, "precondition not met");
            continue;
        }
        let Some(draft) = archetype.build(&roles, rng) else {
            debug!(%archetype, "builder wired no connections");
            continue;
        };

        check_connections(rack, archetype, &draft.connections)?;
        debug!(
            %archetype,
            connections = draft.connections.len(),
            category = %draft.category,
            "patch built"
        );
        patches.push(finish_patch(draft, seed, &roles));
    }

    Ok(patches)
}

/// Rejects an invalid config or rack before any generation work.
///
/// The config is checked first, so a call with both problems reports
/// `InvalidConfiguration`.
pub fn check_inputs(rack: &RackSnapshot, config: &PatchEngineConfig) -> EngineResult<()> {
    let config_result = validate_config(config);
    if !config_result.is_ok() {
        warn!(
            max_patches = config.max_patches,
            "rejected engine configuration"
        );
        return Err(EngineError::InvalidConfiguration(config_result.errors));
    }

    let rack_result = validate_rack(rack);
    if !rack_result.is_ok() {
        warn!(errors = rack_result.errors.len(), "rejected rack snapshot");
        return Err(EngineError::InvalidRack(rack_result.errors));
    }

    Ok(())
}

/// Checks that every connection joins two distinct modules of the rack.
pub fn check_connections(
    rack: &RackSnapshot,
    archetype: Archetype,
    connections: &[Connection],
) -> EngineResult<()> {
    for conn in connections {
        for id in [&conn.from_module_id, &conn.to_module_id] {
            if !rack.contains(id) {
                return Err(EngineError::invariant(
                    archetype.as_str(),
                    format!("{} references unknown module '{}'", conn, id),
                ));
            }
        }
        if conn.from_module_id == conn.to_module_id {
            return Err(EngineError::invariant(
                archetype.as_str(),
                format!("{} loops back to its own module", conn),
            ));
        }
    }
    Ok(())
}

fn finish_patch(draft: PatchDraft, seed: u64, roles: &RoleMap<'_>) -> PatchSpec {
    let originates_at = |role: Role| {
        draft
            .connections
            .iter()
            .any(|c| roles.has_role(&c.from_module_id, role))
    };
    let has_modulator = originates_at(Role::Modulator);
    let has_envelope = originates_at(Role::Envelope);

    PatchSpec {
        name: deterministic_name(seed, draft.category.as_str()),
        category: draft.category,
        waveform: infer_waveform(draft.category, has_modulator, has_envelope),
        connections: draft.connections,
        description: draft.description,
        generation_seed: seed,
        naming_version: NAMING_VERSION,
    }
}
