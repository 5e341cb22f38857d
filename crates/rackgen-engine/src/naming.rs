//! Deterministic patch naming.
//!
//! A name is a pure function of `(seed, category)` and the word-list version:
//!
//! ```text
//! digest = BLAKE3(decimal(seed))
//! s0, s1, s2 = big-endian u32 words 0..3 of digest
//! word1 = PREFIXES[s0 % n]
//! word2 = if s2 is even { TYPE_WORDS[s1 % m] } else { category }
//! ```
//!
//! Names are labels, not keys. The prefix depends only on the seed, and when
//! `s2` is even the second word ignores the category too, so every patch from
//! one generation call can share a name (seed 1 names all four patches of a
//! full rack "Echo Haze"). Identify a patch by its seed, position and
//! connections instead.
//!
//! The word lists are append-only. Each naming version records the list
//! lengths it used, so names persisted under an older version can be
//! reproduced exactly after new words are appended.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Current naming word-list version.
pub const NAMING_VERSION: u32 = 1;

/// First-word candidates. Append only.
pub const PREFIXES: &[&str] = &[
    "Amber", "Astral", "Binary", "Brass", "Cobalt", "Copper", "Crystal", "Dusty", "Echo", "Ember",
    "Feral", "Frozen", "Gilded", "Hollow", "Iron", "Jade", "Lunar", "Molten", "Neon", "Obsidian",
    "Phantom", "Quartz", "Rusty", "Silver", "Solar", "Static", "Tidal", "Velvet", "Violet",
    "Wired", "Woven", "Zenith",
];

/// Second-word candidates. Append only.
pub const TYPE_WORDS: &[&str] = &[
    "Voice", "Drift", "Pulse", "Swarm", "Cascade", "Engine", "Garden", "Signal", "Orbit", "Circuit",
    "Bloom", "Tide", "Spire", "Loop", "Ritual", "Machine", "Current", "Haze", "Lattice", "Ember",
    "Beacon", "Chorus", "Fracture", "Meridian",
];

/// `(version, prefix count, type-word count)` for every published version.
const LIST_LENGTHS: &[(u32, usize, usize)] = &[(1, 32, 24)];

/// The key a generated name is persisted under.
///
/// Storing the version alongside the seed and category lets the name be
/// recomputed later with [`NameKey::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NameKey {
    /// Word-list version.
    pub naming_version: u32,
    /// Generation seed.
    pub seed: u64,
    /// Category string the name was built for.
    pub category: String,
}

impl NameKey {
    /// Creates a key for the current naming version.
    pub fn new(seed: u64, category: impl Into<String>) -> Self {
        Self {
            naming_version: NAMING_VERSION,
            seed,
            category: category.into(),
        }
    }

    /// Recomputes the name this key identifies.
    pub fn resolve(&self) -> EngineResult<String> {
        name_for_version(self.seed, &self.category, self.naming_version)
    }
}

/// Produces the name for `(seed, category)` under the current word lists.
///
/// Distinct categories can map to the same name for a given seed; see the
/// module docs.
///
/// # Example
/// ```
/// use rackgen_engine::naming::deterministic_name;
///
/// let name = deterministic_name(42, "Voice");
/// assert_eq!(name, deterministic_name(42, "Voice"));
/// assert_eq!(name.split(' ').count(), 2);
/// ```
pub fn deterministic_name(seed: u64, category: &str) -> String {
    let (_, prefixes, type_words) = LIST_LENGTHS[LIST_LENGTHS.len() - 1];
    compose(seed, category, prefixes, type_words)
}

/// Produces the name for `(seed, category)` under a specific word-list version.
pub fn name_for_version(seed: u64, category: &str, version: u32) -> EngineResult<String> {
    let (_, prefixes, type_words) = LIST_LENGTHS
        .iter()
        .copied()
        .find(|(v, _, _)| *v == version)
        .ok_or(EngineError::UnknownNamingVersion {
            version,
            latest: NAMING_VERSION,
        })?;
    Ok(compose(seed, category, prefixes, type_words))
}

/// Returns every naming version this build can reproduce.
pub fn known_versions() -> Vec<u32> {
    LIST_LENGTHS.iter().map(|(v, _, _)| *v).collect()
}

fn compose(seed: u64, category: &str, prefixes: usize, type_words: usize) -> String {
    let digest = blake3::hash(seed.to_string().as_bytes());
    let bytes = digest.as_bytes();
    let word = |i: usize| {
        u32::from_be_bytes([
            bytes[4 * i],
            bytes[4 * i + 1],
            bytes[4 * i + 2],
            bytes[4 * i + 3],
        ])
    };
    let (s0, s1, s2) = (word(0), word(1), word(2));

    let first = PREFIXES[s0 as usize % prefixes];
    if s2 % 2 == 0 {
        format!("{} {}", first, TYPE_WORDS[s1 as usize % type_words])
    } else {
        format!("{} {}", first, category)
    }
}
