//! Mode and level catalogs for the game.
//!
//! The built-in catalog is embedded in the binary at compile time and parsed
//! once at startup. An override catalog with the same schema can be loaded
//! from disk. Either way the catalog is validated on load and never modified
//! afterwards, so it can be shared freely between request handlers.

pub mod types;

pub use types::{ItemData, ItemType, LevelDefinition, LevelVariant, ModeDefinition};

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Built-in catalog, embedded from `assets/catalog.json`.
pub const BUILTIN_CATALOG: &str = include_str!("../../assets/catalog.json");

/// Catalog schema version this build understands.
pub const CATALOG_VERSION: u32 = 1;

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("Failed to read catalog file {path}: {source}")]
    Read {
        /// Path of the catalog file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// The catalog is not valid JSON or does not match the schema.
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    /// The catalog was written for another schema version.
    #[error("Unsupported catalog version {found}, expected {CATALOG_VERSION}")]
    UnsupportedVersion {
        /// Version declared by the file
        found: u32,
    },
    /// A key appears twice.
    #[error("Duplicate {kind} key '{key}'")]
    DuplicateKey {
        /// "mode" or "level"
        kind: &'static str,
        /// The repeated key
        key: String,
    },
    /// A mode lacks a variant for one of the catalog's levels.
    #[error("Mode '{mode}' has no variant for level '{level}'")]
    MissingVariant {
        /// Mode key
        mode: String,
        /// Level key
        level: String,
    },
    /// A mode defines a variant for a level the catalog does not know.
    #[error("Mode '{mode}' defines a variant for unknown level '{level}'")]
    UnknownLevel {
        /// Mode key
        mode: String,
        /// Level key
        level: String,
    },
    /// A level or variant breaks one of the catalog rules.
    #[error("Invalid entry '{key}': {reason}")]
    Invalid {
        /// "level" or "mode/level" of the offending entry
        key: String,
        /// What rule was broken
        reason: String,
    },
}

/// On-disk schema of a catalog file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    version: u32,
    levels: Vec<LevelEntry>,
    modes: Vec<ModeEntry>,
}

#[derive(Debug, Deserialize)]
struct LevelEntry {
    key: String,
    #[serde(flatten)]
    level: LevelDefinition,
}

#[derive(Debug, Deserialize)]
struct ModeEntry {
    key: String,
    #[serde(flatten)]
    mode: ModeDefinition,
}

/// Immutable collection of every mode and level, in declaration order.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Modes in declaration order
    modes: Vec<(String, ModeDefinition)>,
    /// Levels in declaration order
    levels: Vec<(String, LevelDefinition)>,
    /// Fast lookup by mode key
    mode_lookup: HashMap<String, usize>,
    /// Fast lookup by level key
    level_lookup: HashMap<String, usize>,
}

impl Catalog {
    /// Loads the catalog embedded in the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    /// Loads a catalog from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Parses and validates a catalog from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;

        if file.version != CATALOG_VERSION {
            return Err(CatalogError::UnsupportedVersion {
                found: file.version,
            });
        }

        let mut level_lookup = HashMap::new();
        let mut levels = Vec::with_capacity(file.levels.len());
        for entry in file.levels {
            if level_lookup.contains_key(&entry.key) {
                return Err(CatalogError::DuplicateKey {
                    kind: "level",
                    key: entry.key,
                });
            }
            entry.level.check().map_err(|reason| CatalogError::Invalid {
                key: entry.key.clone(),
                reason,
            })?;
            level_lookup.insert(entry.key.clone(), levels.len());
            levels.push((entry.key, entry.level));
        }

        let mut mode_lookup = HashMap::new();
        let mut modes = Vec::with_capacity(file.modes.len());
        for entry in file.modes {
            if mode_lookup.contains_key(&entry.key) {
                return Err(CatalogError::DuplicateKey {
                    kind: "mode",
                    key: entry.key,
                });
            }

            for (level_key, _) in &levels {
                if !entry.mode.levels.contains_key(level_key) {
                    return Err(CatalogError::MissingVariant {
                        mode: entry.key,
                        level: level_key.clone(),
                    });
                }
            }

            for (level_key, variant) in &entry.mode.levels {
                if !level_lookup.contains_key(level_key) {
                    return Err(CatalogError::UnknownLevel {
                        mode: entry.key,
                        level: level_key.clone(),
                    });
                }
                variant.check().map_err(|reason| CatalogError::Invalid {
                    key: format!("{}/{}", entry.key, level_key),
                    reason,
                })?;
            }

            mode_lookup.insert(entry.key.clone(), modes.len());
            modes.push((entry.key, entry.mode));
        }

        debug!(
            "Loaded catalog with {} modes and {} levels",
            modes.len(),
            levels.len()
        );

        Ok(Self {
            modes,
            levels,
            mode_lookup,
            level_lookup,
        })
    }

    /// Gets a mode by key.
    #[must_use]
    pub fn mode(&self, key: &str) -> Option<&ModeDefinition> {
        let idx = self.mode_lookup.get(key)?;
        self.modes.get(*idx).map(|(_, mode)| mode)
    }

    /// Gets a level by key.
    #[must_use]
    pub fn level(&self, key: &str) -> Option<&LevelDefinition> {
        let idx = self.level_lookup.get(key)?;
        self.levels.get(*idx).map(|(_, level)| level)
    }

    /// Iterates over all modes in declaration order.
    pub fn modes(&self) -> impl Iterator<Item = (&str, &ModeDefinition)> {
        self.modes.iter().map(|(key, mode)| (key.as_str(), mode))
    }

    /// Iterates over all levels in declaration order.
    pub fn levels(&self) -> impl Iterator<Item = (&str, &LevelDefinition)> {
        self.levels.iter().map(|(key, level)| (key.as_str(), level))
    }
}
