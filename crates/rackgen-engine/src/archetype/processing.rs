//! Processing chain: a mixer or other source feeding an effect.

use rackgen_spec::{CableType, Category};
use rand::Rng;

use super::{ports, Archetype, PatchDraft, Wiring};
use crate::analyzer::{Role, RoleMap};

/// Source roles tried in order after the effect is picked.
const SOURCE_PREFERENCE: [Role; 4] = [
    Role::Mixer,
    Role::Amplifier,
    Role::Oscillator,
    Role::NoiseSource,
];

pub(super) fn build<R: Rng + ?Sized>(roles: &RoleMap<'_>, rng: &mut R) -> Option<PatchDraft> {
    let mut wiring = Wiring::new();

    let effect = wiring.pick(rng, roles, Role::Effect)?;
    let source = SOURCE_PREFERENCE
        .iter()
        .find_map(|role| wiring.pick(rng, roles, *role))?;

    wiring.connect(source, ports::OUT, effect, ports::IN, CableType::Audio);
    let mut description = format!("Processing chain: {} -> {}", source.id, effect.id);

    if let Some(lfo) = wiring.pick(rng, roles, Role::Modulator) {
        wiring.connect(lfo, ports::OUT, effect, ports::CV, CableType::Cv);
        description.push_str(&format!(", {} animates {}", lfo.id, effect.id));
    }

    Some(wiring.finish(Archetype::ProcessingChain, Category::TextureFx, description))
}
