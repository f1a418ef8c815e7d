//! Integration tests for catalog loading and selection resolution.

use std::collections::HashSet;
use std::fs;

use tempfile::TempDir;

use fallcatch::catalog::{Catalog, CatalogError, ItemType, BUILTIN_CATALOG};
use fallcatch::resolver::SelectionError;

fn catalog() -> Catalog {
    Catalog::builtin().expect("built-in catalog should load")
}

// ============================================================================
// Properties over every selection
// ============================================================================

#[test]
fn test_every_selection_resolves_with_mode_name_and_icon() {
    let catalog = catalog();

    for (mode_key, mode) in catalog.modes() {
        for (level_key, level) in catalog.levels() {
            let config = catalog
                .resolve(mode_key, level_key)
                .unwrap_or_else(|e| panic!("{mode_key}/{level_key}: {e}"));

            assert_eq!(config.mode.name, mode.name);
            assert_eq!(config.mode.icon, mode.icon);
            assert_eq!(&config.level, level);
        }
    }
}

#[test]
fn test_correct_and_wrong_items_are_disjoint_subsets() {
    let catalog = catalog();

    for (mode_key, _) in catalog.modes() {
        for (level_key, _) in catalog.levels() {
            let config = catalog.resolve(mode_key, level_key).unwrap();
            let items: HashSet<&String> = config.mode.items.iter().collect();
            let correct: HashSet<&String> = config.mode.correct_items.iter().collect();
            let wrong: HashSet<&String> = config.mode.wrong_items.iter().collect();

            assert!(correct.is_disjoint(&wrong), "{mode_key}/{level_key}");
            assert!(correct.union(&wrong).all(|item| items.contains(item)));
        }
    }
}

#[test]
fn test_resolve_is_deterministic() {
    let catalog = catalog();
    let first = catalog.resolve("animals", "preschool").unwrap();
    let second = catalog.resolve("animals", "preschool").unwrap();
    assert_eq!(first, second);

    let reloaded = Catalog::builtin().unwrap();
    assert_eq!(reloaded.resolve("animals", "preschool").unwrap(), first);
}

#[test]
fn test_invalid_mode_key() {
    let err = catalog().resolve("not_a_mode", "preschool").unwrap_err();
    assert_eq!(err, SelectionError::InvalidMode("not_a_mode".to_string()));
}

#[test]
fn test_invalid_level_key() {
    let err = catalog().resolve("alphabet", "not_a_level").unwrap_err();
    assert_eq!(err, SelectionError::InvalidLevel("not_a_level".to_string()));
}

// ============================================================================
// Concrete selections
// ============================================================================

#[test]
fn test_alphabet_preschool() {
    let config = catalog().resolve("alphabet", "preschool").unwrap();

    let expected: Vec<String> = ('A'..='Z').map(|c| c.to_string()).collect();
    assert_eq!(config.mode.items, expected);
    assert_eq!(config.mode.correct_items, ["A", "E", "I", "O", "U"]);
    assert_eq!(config.mode.items_on_screen, 3);
    assert_eq!(config.mode.item_type, ItemType::Uppercase);
    assert_eq!(config.level.starting_hearts, 5);
    assert_eq!(config.level.time_limit, 120);
}

#[test]
fn test_alphabet_kindergarten_keeps_literal_consonant_set() {
    let catalog = catalog();
    let config = catalog.resolve("alphabet", "kindergarten").unwrap();

    assert_eq!(
        config.mode.correct_items,
        ["B", "C", "D", "F", "G", "H", "J", "K", "L", "M"]
    );
    assert_eq!(config.mode.wrong_items, ["A", "E", "I", "O", "U"]);
    assert_eq!(config.mode.item_type, ItemType::Phonics);

    let phonics = config.mode.phonics_map.as_ref().unwrap();
    assert_eq!(phonics.len(), 26);
    assert_eq!(phonics["Q"], "/kwuh/");

    let variant = catalog.variant("alphabet", "kindergarten").unwrap();
    assert!(variant.is_correct("B"));
    assert!(!variant.is_correct("N"));
    assert_eq!(
        variant.prompt_for("B").as_deref(),
        Some("Catch the letter with sound /buh/")
    );
}

#[test]
fn test_shapes_kindergarten() {
    let config = catalog().resolve("shapes", "kindergarten").unwrap();

    assert_eq!(config.mode.item_type, ItemType::Riddle);
    assert_eq!(config.mode.correct_items.len(), 5);
    assert!((config.level.base_speed - 3.5).abs() < f64::EPSILON);

    let data = config.mode.data.as_ref().unwrap();
    assert_eq!(data["🔺"].object.as_deref(), Some("🍕"));
}

#[test]
fn test_animals_nursery() {
    let config = catalog().resolve("animals", "nursery").unwrap();

    assert!(config.mode.audio_template.contains("{name}"));

    let data = config.mode.data.as_ref().unwrap();
    assert_eq!(data.len(), 12);
    for item in &config.mode.items {
        let entry = &data[item];
        assert!(!entry.name.is_empty());
        assert!(!entry.riddle.is_empty());
        assert!(entry.sound.is_some());
    }
}

#[test]
fn test_riddle_prompt() {
    let catalog = catalog();
    let variant = catalog.variant("animals", "kindergarten").unwrap();
    assert_eq!(
        variant.prompt_for("🐶").as_deref(),
        Some("Catch the animal that barks")
    );
    assert_eq!(variant.prompt_for("🦖"), None);
}

// ============================================================================
// Override catalogs
// ============================================================================

#[test]
fn test_catalog_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("catalog.json");
    fs::write(&path, BUILTIN_CATALOG).unwrap();

    let catalog = Catalog::from_file(&path).unwrap();
    assert_eq!(catalog.modes().count(), 3);
}

#[test]
fn test_catalog_from_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = Catalog::from_file(&temp_dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, CatalogError::Read { .. }));
}

#[test]
fn test_catalog_with_extra_level_needs_every_variant() {
    let mut value: serde_json::Value = serde_json::from_str(BUILTIN_CATALOG).unwrap();
    let mut extra = value["levels"][0].clone();
    extra["key"] = "toddler".into();
    value["levels"].as_array_mut().unwrap().push(extra);

    let err = Catalog::from_json_str(&value.to_string()).unwrap_err();
    assert!(matches!(err, CatalogError::MissingVariant { .. }));
    assert!(err.to_string().contains("toddler"));
}

#[test]
fn test_catalog_rejects_invalid_level_parameters() {
    let mut value: serde_json::Value = serde_json::from_str(BUILTIN_CATALOG).unwrap();
    value["levels"][1]["spawn_interval"] = 0.into();

    let err = Catalog::from_json_str(&value.to_string()).unwrap_err();
    assert!(matches!(err, CatalogError::Invalid { ref key, .. } if key == "nursery"));
}
