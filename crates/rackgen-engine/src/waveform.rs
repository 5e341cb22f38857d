//! Waveform parameter inference.
//!
//! Maps a patch's category and control features to the rendering hints an
//! external waveform renderer consumes. Pure table lookup.

use rackgen_spec::{Category, EnvelopeTimingClass, WaveformFamily, WaveformParams};

/// Infers rendering parameters for a patch.
///
/// # Arguments
/// * `category` - Patch category
/// * `has_modulator` - Some connection originates at a modulator
/// * `has_envelope` - Some connection originates at an envelope
pub fn infer_waveform(
    category: Category,
    has_modulator: bool,
    has_envelope: bool,
) -> WaveformParams {
    let (family, timing, noise_mix) = match category {
        Category::Lead => (WaveformFamily::Saw, EnvelopeTimingClass::Sustained, false),
        Category::Bass => (WaveformFamily::Square, EnvelopeTimingClass::Plucked, false),
        Category::Pad => (WaveformFamily::Triangle, EnvelopeTimingClass::Swell, false),
        Category::Drone => (WaveformFamily::Sine, EnvelopeTimingClass::Sustained, false),
        Category::Generative => (WaveformFamily::Sine, EnvelopeTimingClass::Plucked, false),
        Category::ClockRhythm => (WaveformFamily::Noise, EnvelopeTimingClass::Percussive, true),
        Category::TextureFx => (WaveformFamily::Sine, EnvelopeTimingClass::Swell, true),
        Category::Utility => (WaveformFamily::Sine, EnvelopeTimingClass::Sustained, false),
    };

    let waveform_family = match family {
        WaveformFamily::Sine | WaveformFamily::Triangle if has_modulator => WaveformFamily::Complex,
        other => other,
    };

    WaveformParams {
        waveform_family,
        envelope_timing_class: if has_envelope {
            timing
        } else {
            EnvelopeTimingClass::Gated
        },
        noise_mix,
    }
}
