//! Loading of rack snapshots and engine configs from JSON files.

use rackgen_spec::{PatchEngineConfig, RackSnapshot};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A rack snapshot loaded from disk.
#[derive(Debug)]
pub struct LoadedRack {
    /// The parsed rack.
    pub rack: RackSnapshot,
    /// BLAKE3 hash of the file content (hex string).
    pub source_hash: String,
}

/// Errors that can occur while loading input files.
#[derive(Debug)]
pub enum InputError {
    /// File could not be read.
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON parsing failed.
    JsonParse { path: PathBuf, message: String },
}

impl InputError {
    /// Path of the file that failed to load.
    pub fn path(&self) -> &Path {
        match self {
            InputError::FileRead { path, .. } | InputError::JsonParse { path, .. } => path,
        }
    }
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::FileRead { path, source } => {
                write!(f, "failed to read file '{}': {}", path.display(), source)
            }
            InputError::JsonParse { path, message } => {
                write!(f, "JSON parse error in '{}': {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::FileRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

fn read(path: &Path) -> Result<String, InputError> {
    std::fs::read_to_string(path).map_err(|source| InputError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a rack snapshot (`{"modules": [...]}`) from a JSON file.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use rackgen_cli::input::load_rack;
///
/// let loaded = load_rack(Path::new("rack.json")).unwrap();
/// println!("{} modules", loaded.rack.len());
/// ```
pub fn load_rack(path: &Path) -> Result<LoadedRack, InputError> {
    let content = read(path)?;
    let rack = RackSnapshot::from_json(&content).map_err(|e| InputError::JsonParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let source_hash = blake3::hash(content.as_bytes()).to_hex().to_string();
    debug!(path = %path.display(), modules = rack.len(), %source_hash, "loaded rack");

    Ok(LoadedRack { rack, source_hash })
}

/// Loads an engine config from a JSON file. Missing keys take defaults.
pub fn load_config(path: &Path) -> Result<PatchEngineConfig, InputError> {
    let content = read(path)?;
    PatchEngineConfig::from_json(&content).map_err(|e| InputError::JsonParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Resolves the effective config: the file (if any) with flag overrides applied.
pub fn resolve_config(
    config_path: Option<&str>,
    max_patches: Option<i64>,
) -> Result<PatchEngineConfig, InputError> {
    let mut config = match config_path {
        Some(path) => load_config(Path::new(path))?,
        None => PatchEngineConfig::default(),
    };
    if let Some(max) = max_patches {
        config.max_patches = max;
    }
    debug!(
        max_patches = config.max_patches,
        from_file = config_path.is_some(),
        "resolved engine config"
    );
    Ok(config)
}
