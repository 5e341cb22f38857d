//! Subtractive voice: oscillator, optional filter, amplifier, envelope.

use rackgen_spec::{CableType, Category};
use rand::Rng;
use tracing::debug;

use super::{describe_chain, ports, Archetype, PatchDraft, Wiring};
use crate::analyzer::{Role, RoleMap};
use crate::rng::pick_index;

/// Chance that an available modulator gets patched in.
pub const MODULATION_PROBABILITY: f64 = 0.5;

/// Connection count at which a voice is considered a pad.
pub const PAD_CONNECTION_THRESHOLD: usize = 4;

const VOICE_CATEGORIES: [Category; 3] = [Category::Lead, Category::Bass, Category::Pad];

pub(super) fn build<R: Rng + ?Sized>(roles: &RoleMap<'_>, rng: &mut R) -> Option<PatchDraft> {
    let mut wiring = Wiring::new();

    let osc = wiring.pick(rng, roles, Role::Oscillator)?;
    let filter = wiring.pick(rng, roles, Role::Filter);
    let amp = wiring.pick(rng, roles, Role::Amplifier)?;
    let env = wiring.pick(rng, roles, Role::Envelope);

    let chain: Vec<_> = [Some(osc), filter, Some(amp)].into_iter().flatten().collect();
    wiring.audio_chain(&chain);
    let mut description = format!("Subtractive voice: {}", describe_chain(&chain));

    if let Some(env) = env {
        wiring.connect(env, ports::OUT, amp, ports::CV, CableType::Cv);
        description.push_str(&format!(", {} shapes the amplitude", env.id));
    }

    if roles.count(Role::Modulator) > 0 {
        let roll: f64 = rng.gen();
        if roll < MODULATION_PROBABILITY {
            if let Some(lfo) = wiring.pick(rng, roles, Role::Modulator) {
                let (target, port) = match filter {
                    Some(filter) if rng.gen_range(0..2) == 0 => (filter, ports::CUTOFF),
                    _ => (osc, ports::FM),
                };
                wiring.connect(lfo, ports::OUT, target, port, CableType::Cv);
                description.push_str(&format!(", {} modulates {}.{}", lfo.id, target.id, port));
            }
        } else {
            debug!(roll, "modulator left unpatched");
        }
    }

    let category = match env {
        Some(_) => {
            let drawn = pick_index(rng, VOICE_CATEGORIES.len())
                .map_or(Category::Lead, |i| VOICE_CATEGORIES[i]);
            if wiring.len() >= PAD_CONNECTION_THRESHOLD {
                Category::Pad
            } else {
                drawn
            }
        }
        None => Category::Drone,
    };

    Some(wiring.finish(Archetype::SubtractiveVoice, category, description))
}
