//! Rhythmic: a noise (or oscillator) hit gated by a short-decay envelope.

use rackgen_spec::{CableType, Category};
use rand::Rng;

use super::{describe_chain, ports, Archetype, PatchDraft, Wiring};
use crate::analyzer::{Role, RoleMap};

pub(super) fn build<R: Rng + ?Sized>(roles: &RoleMap<'_>, rng: &mut R) -> Option<PatchDraft> {
    let mut wiring = Wiring::new();

    let source = match wiring.pick(rng, roles, Role::NoiseSource) {
        Some(noise) => Some(noise),
        None => wiring.pick(rng, roles, Role::Oscillator),
    };
    let filter = wiring.pick(rng, roles, Role::Filter);
    let amp = wiring.pick(rng, roles, Role::Amplifier);
    let env = wiring.pick(rng, roles, Role::Envelope);
    let seq = wiring.pick(rng, roles, Role::Sequencer);

    let chain: Vec<_> = [source, filter, amp].into_iter().flatten().collect();
    wiring.audio_chain(&chain);
    let mut description = format!("Rhythmic hit: {}", describe_chain(&chain));

    if let Some(env) = env {
        let target = match (amp, filter) {
            (Some(amp), _) => Some((amp, ports::CV)),
            (None, Some(filter)) => Some((filter, ports::CUTOFF)),
            (None, None) => None,
        };
        if let Some((module, port)) = target {
            wiring.connect(env, ports::OUT, module, port, CableType::Cv);
            description.push_str(&format!(
                ", short-decay envelope {} on {}.{}",
                env.id, module.id, port
            ));
        }

        if let Some(seq) = seq {
            wiring.connect(seq, ports::GATE, env, ports::GATE, CableType::Gate);
            description.push_str(&format!(", triggered by {}", seq.id));
        }
    }

    Some(wiring.finish(Archetype::Rhythmic, Category::ClockRhythm, description))
}
