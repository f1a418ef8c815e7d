//! Typed definitions for game modes, difficulty levels and their variants.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How an item is presented to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemType {
    /// Capital letter glyph
    #[serde(rename = "uppercase")]
    Uppercase,
    /// Small letter glyph
    #[serde(rename = "lowercase")]
    Lowercase,
    /// Letter prompted by its sound
    #[serde(rename = "phonics")]
    Phonics,
    /// Picture only
    #[serde(rename = "picture")]
    Picture,
    /// Picture prompted by its written word
    #[serde(rename = "picture+word")]
    PictureWord,
    /// Picture prompted by a descriptive riddle
    #[serde(rename = "riddle")]
    Riddle,
}

impl ItemType {
    /// Returns the wire name of this item type (e.g. "picture+word").
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uppercase => "uppercase",
            Self::Lowercase => "lowercase",
            Self::Phonics => "phonics",
            Self::Picture => "picture",
            Self::PictureWord => "picture+word",
            Self::Riddle => "riddle",
        }
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rich metadata for a picture item (animal or shape).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemData {
    /// Display name (e.g., "Dog", "Circle")
    pub name: String,
    /// Riddle text used by riddle prompts (e.g., "the animal that barks")
    pub riddle: String,
    /// Sound the animal makes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
    /// Real-life object linked to a shape (e.g., a pizza slice for a triangle)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
}

/// A mode's behavior at one difficulty level.
///
/// # Validation
///
/// - `correct_items` and `wrong_items` are subsets of `items`
/// - `correct_items` and `wrong_items` are disjoint
/// - `items` holds no duplicates and `items_on_screen` is positive
/// - `data` and `phonics_map`, when present, cover every item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelVariant {
    /// Target age range, display only
    pub target_age: String,
    /// Prompt template with `{item}`, `{name}`, `{riddle}` or `{phonics}` slots
    pub audio_template: String,
    /// Every item that can fall during a round, in display order
    pub items: Vec<String>,
    /// Items that satisfy the round's prompt
    pub correct_items: Vec<String>,
    /// Distractor items
    pub wrong_items: Vec<String>,
    /// Presentation style of the items
    pub item_type: ItemType,
    /// Number of items falling at the same time
    pub items_on_screen: u32,
    /// Pedagogical goal of this variant
    pub challenge_focus: String,
    /// Per-item metadata for picture modes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<BTreeMap<String, ItemData>>,
    /// Letter to phonetic spelling, used by phonics prompts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phonics_map: Option<BTreeMap<String, String>>,
}

impl LevelVariant {
    /// Returns true if `item` belongs to this variant.
    #[must_use]
    pub fn contains(&self, item: &str) -> bool {
        self.items.iter().any(|i| i == item)
    }

    /// Returns true if catching `item` counts as a correct catch.
    #[must_use]
    pub fn is_correct(&self, item: &str) -> bool {
        self.correct_items.iter().any(|i| i == item)
    }

    /// Fills the audio template for a single item.
    ///
    /// Returns `None` if the item is not part of this variant or if the
    /// template needs metadata the variant does not carry for it.
    ///
    /// # Examples
    ///
    /// ```
    /// use fallcatch::catalog::Catalog;
    ///
    /// let catalog = Catalog::builtin().unwrap();
    /// let variant = catalog.variant("alphabet", "preschool").unwrap();
    /// assert_eq!(variant.prompt_for("A").as_deref(), Some("Catch the letter A"));
    /// ```
    #[must_use]
    pub fn prompt_for(&self, item: &str) -> Option<String> {
        if !self.contains(item) {
            return None;
        }

        let mut prompt = self.audio_template.replace("{item}", item);

        if prompt.contains("{name}") || prompt.contains("{riddle}") {
            let data = self.data.as_ref()?.get(item)?;
            prompt = prompt
                .replace("{name}", &data.name)
                .replace("{riddle}", &data.riddle);
        }

        if prompt.contains("{phonics}") {
            let sound = self.phonics_map.as_ref()?.get(item)?;
            prompt = prompt.replace("{phonics}", sound);
        }

        Some(prompt)
    }

    /// Checks the subset and coverage rules of this variant.
    pub(crate) fn check(&self) -> Result<(), String> {
        let mut seen = std::collections::HashSet::new();
        for item in &self.items {
            if !seen.insert(item.as_str()) {
                return Err(format!("duplicate item '{item}'"));
            }
        }

        if self.items_on_screen == 0 {
            return Err("items_on_screen must be positive".to_string());
        }

        for item in self.correct_items.iter().chain(&self.wrong_items) {
            if !seen.contains(item.as_str()) {
                return Err(format!("item '{item}' is not listed in items"));
            }
        }

        if let Some(item) = self.correct_items.iter().find(|c| self.wrong_items.contains(*c)) {
            return Err(format!("item '{item}' is both correct and wrong"));
        }

        if let Some(data) = &self.data {
            if let Some(item) = self.items.iter().find(|i| !data.contains_key(*i)) {
                return Err(format!("item '{item}' has no data entry"));
            }
        }

        if let Some(phonics) = &self.phonics_map {
            if let Some(item) = self.items.iter().find(|i| !phonics.contains_key(*i)) {
                return Err(format!("item '{item}' has no phonics entry"));
            }
        }

        Ok(())
    }
}

/// A learning mode (alphabet, animals, shapes) with one variant per level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeDefinition {
    /// Display name (e.g., "Alphabet")
    pub name: String,
    /// Short description for the selection screen
    pub description: String,
    /// Icon glyph
    pub icon: String,
    /// Variants keyed by level key
    pub levels: BTreeMap<String, LevelVariant>,
}

impl ModeDefinition {
    /// Gets the variant for a level key.
    #[must_use]
    pub fn variant(&self, level: &str) -> Option<&LevelVariant> {
        self.levels.get(level)
    }
}

/// Pacing and scoring parameters for a difficulty level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    /// Display name (e.g., "Preschool")
    pub name: String,
    /// Short description for the selection screen
    pub description: String,
    /// Icon glyph
    pub icon: String,
    /// Falling speed multiplier
    pub base_speed: f64,
    /// Milliseconds between spawns
    pub spawn_interval: u32,
    /// Lives at the start of a round
    pub starting_hearts: u32,
    /// Round length in seconds
    pub time_limit: u32,
}

impl LevelDefinition {
    pub(crate) fn check(&self) -> Result<(), String> {
        if !(self.base_speed.is_finite() && self.base_speed > 0.0) {
            return Err(format!("base_speed must be positive, got {}", self.base_speed));
        }
        if self.spawn_interval == 0 {
            return Err("spawn_interval must be positive".to_string());
        }
        if self.starting_hearts == 0 {
            return Err("starting_hearts must be positive".to_string());
        }
        if self.time_limit == 0 {
            return Err("time_limit must be positive".to_string());
        }
        Ok(())
    }
}
