//! Resolution of a (mode, level) selection into a single game configuration.
//!
//! The resolved configuration is what the play page hands to the client-side
//! engine: the mode's name and icon, every field of the selected level
//! variant, and the level's pacing parameters.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::catalog::{Catalog, ItemData, ItemType, LevelDefinition, LevelVariant, ModeDefinition};

/// Message shown to players when a selection cannot be resolved.
pub const INVALID_SELECTION: &str = "Invalid selection";

/// Errors raised when a mode or level key is unknown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The mode key is not in the catalog.
    #[error("Invalid mode: {0}")]
    InvalidMode(String),
    /// The level key is not in the catalog.
    #[error("Invalid level: {0}")]
    InvalidLevel(String),
}

impl SelectionError {
    /// Human-readable message for the selection page.
    #[must_use]
    pub fn user_message(&self) -> String {
        format!("{INVALID_SELECTION}: {self}")
    }
}

/// Mode section of a resolved configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedMode {
    /// Mode display name
    pub name: String,
    /// Mode icon
    pub icon: String,
    /// Target age range
    pub target_age: String,
    /// Prompt template
    pub audio_template: String,
    /// All items for the round
    pub items: Vec<String>,
    /// Items to catch
    pub correct_items: Vec<String>,
    /// Items to avoid
    pub wrong_items: Vec<String>,
    /// Presentation style
    pub item_type: ItemType,
    /// Items falling at once
    pub items_on_screen: u32,
    /// Pedagogical goal
    pub challenge_focus: String,
    /// Per-item metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<BTreeMap<String, ItemData>>,
    /// Letter to phonetic spelling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonics_map: Option<BTreeMap<String, String>>,
}

/// Merged configuration for one mode at one level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedConfig {
    /// Mode name and icon plus the level variant
    pub mode: ResolvedMode,
    /// Pacing and scoring parameters
    pub level: LevelDefinition,
}

impl Catalog {
    /// Looks up a mode, a level and the mode's variant for that level.
    ///
    /// The mode key is checked before the level key.
    fn lookup(
        &self,
        mode: &str,
        level: &str,
    ) -> Result<(&ModeDefinition, &LevelDefinition, &LevelVariant), SelectionError> {
        let mode_def = self
            .mode(mode)
            .ok_or_else(|| SelectionError::InvalidMode(mode.to_string()))?;
        let level_def = self
            .level(level)
            .ok_or_else(|| SelectionError::InvalidLevel(level.to_string()))?;
        let variant = mode_def
            .variant(level)
            .ok_or_else(|| SelectionError::InvalidLevel(level.to_string()))?;

        Ok((mode_def, level_def, variant))
    }

    /// Gets the variant of `mode` at `level`.
    ///
    /// The mode key is checked before the level key.
    pub fn variant(&self, mode: &str, level: &str) -> Result<&LevelVariant, SelectionError> {
        self.lookup(mode, level).map(|(_, _, variant)| variant)
    }

    /// Resolves a mode and level into the configuration for a round.
    ///
    /// # Examples
    ///
    /// ```
    /// use fallcatch::catalog::Catalog;
    ///
    /// let catalog = Catalog::builtin().unwrap();
    /// let config = catalog.resolve("alphabet", "preschool").unwrap();
    /// assert_eq!(config.mode.name, "Alphabet");
    /// assert_eq!(config.level.starting_hearts, 5);
    /// ```
    pub fn resolve(&self, mode: &str, level: &str) -> Result<ResolvedConfig, SelectionError> {
        let (mode_def, level_def, variant) = self.lookup(mode, level)?;

        Ok(ResolvedConfig {
            mode: ResolvedMode {
                name: mode_def.name.clone(),
                icon: mode_def.icon.clone(),
                target_age: variant.target_age.clone(),
                audio_template: variant.audio_template.clone(),
                items: variant.items.clone(),
                correct_items: variant.correct_items.clone(),
                wrong_items: variant.wrong_items.clone(),
                item_type: variant.item_type,
                items_on_screen: variant.items_on_screen,
                challenge_focus: variant.challenge_focus.clone(),
                data: variant.data.clone(),
                phonics_map: variant.phonics_map.clone(),
            },
            level: level_def.clone(),
        })
    }
}
