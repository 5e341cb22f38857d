//! Generative: a sequencer plays an oscillator while modulators move it.

use rackgen_spec::{CableType, Category};
use rand::Rng;

use super::{ports, Archetype, PatchDraft, Wiring};
use crate::analyzer::{Role, RoleMap};

pub(super) fn build<R: Rng + ?Sized>(roles: &RoleMap<'_>, rng: &mut R) -> Option<PatchDraft> {
    let mut wiring = Wiring::new();

    let osc = wiring.pick(rng, roles, Role::Oscillator);
    let filter = wiring.pick(rng, roles, Role::Filter);
    let seq = wiring.pick(rng, roles, Role::Sequencer);
    let (m1, m2) = if roles.count(Role::Modulator) >= 2 {
        let m1 = wiring.pick(rng, roles, Role::Modulator);
        let m2 = wiring.pick(rng, roles, Role::Modulator);
        (m1, m2)
    } else {
        (None, None)
    };

    let mut parts = Vec::new();

    if let (Some(seq), Some(osc)) = (seq, osc) {
        wiring.connect(seq, ports::PITCH, osc, ports::PITCH, CableType::Cv);
        parts.push(format!("{} sequences {}", seq.id, osc.id));
    }

    if let Some(m1) = m1 {
        let target = match (osc, filter) {
            (Some(osc), _) => Some((osc, ports::FM)),
            (None, Some(filter)) => Some((filter, ports::RESONANCE)),
            (None, None) => None,
        };
        if let Some((module, port)) = target {
            wiring.connect(m1, ports::OUT, module, port, CableType::Cv);
            parts.push(format!("{} drifts {}.{}", m1.id, module.id, port));
        }
    }

    if let Some(m2) = m2 {
        let target = match (filter, osc) {
            (Some(filter), _) => Some((filter, ports::CUTOFF)),
            (None, Some(osc)) => Some((osc, ports::PWM)),
            (None, None) => None,
        };
        if let Some((module, port)) = target {
            wiring.connect(m2, ports::OUT, module, port, CableType::Cv);
            parts.push(format!("{} sweeps {}.{}", m2.id, module.id, port));
        }
    }

    let description = format!("Generative: {}", parts.join(", "));
    Some(wiring.finish(Archetype::Generative, Category::Generative, description))
}
