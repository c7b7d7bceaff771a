//! # Variant Selection Tests
//!
//! Precedence of explicit, remembered and default variants, and the effect of
//! the active variant on displayed content.

use recipe_portions::content_filter::{filter_entries, filter_sections};
use recipe_portions::preferences::{InMemoryStore, PreferenceStore};
use recipe_portions::recipe_model::Recipe;
use recipe_portions::recipe_view::RecipeSession;
use recipe_portions::variant_selector::select_variant;

fn lasagna() -> Recipe {
    Recipe::from_json(
        r#"{
            "title": {"en": "Lasagna"},
            "portion": {"type": "servings", "value": 4, "unit": "persons"},
            "variants": [
                {"key": "classic", "name": {"en": "Classic"}},
                {"key": "meat", "name": {"en": "Meat"}},
                {"key": "veg", "name": {"en": "Vegetarian"}}
            ],
            "ingredients": [
                {"ingredient": "pasta", "value": 250, "unit": "g"},
                {"ingredient": "beef", "value": 400, "unit": "g", "onlyForVariation": ["classic", "meat"]},
                {"ingredient": "spinach", "value": 300, "unit": "g", "onlyForVariation": "veg"}
            ],
            "instructions": [
                {"text": {"en": "Brown the beef"}, "onlyForVariation": ["classic", "meat"]},
                {"text": {"en": "Wilt the spinach"}, "onlyForVariation": "veg"},
                {"text": {"en": "Layer and bake"}, "image": "img/bake.webp"}
            ]
        }"#,
    )
    .unwrap()
}

#[test]
fn test_variant_precedence_chain() {
    let recipe = lasagna();

    // Explicit key beats the stored preference
    let mut store = PreferenceStore::new(InMemoryStore::new());
    store.save_variant_preference("lasagna", "meat").unwrap();
    let selected = select_variant(&recipe, Some("veg"), "lasagna", &mut store);
    assert_eq!(selected.as_deref(), Some("veg"));

    // Stored preference beats the first declared variant
    let mut store = PreferenceStore::new(InMemoryStore::new());
    store.save_variant_preference("lasagna", "meat").unwrap();
    let selected = select_variant(&recipe, None, "lasagna", &mut store);
    assert_eq!(selected.as_deref(), Some("meat"));

    // Neither: first declared variant
    let mut store = PreferenceStore::new(InMemoryStore::new());
    let selected = select_variant(&recipe, None, "lasagna", &mut store);
    assert_eq!(selected.as_deref(), Some("classic"));
}

#[test]
fn test_explicit_key_becomes_remembered() {
    let mut store = PreferenceStore::new(InMemoryStore::new());
    RecipeSession::open("lasagna", lasagna(), Some("veg"), &mut store);

    let reopened = RecipeSession::open("lasagna", lasagna(), None, &mut store);
    assert_eq!(reopened.variant(), Some("veg"));
}

#[test]
fn test_user_variant_change_is_remembered() {
    let mut store = PreferenceStore::new(InMemoryStore::new());
    let mut session = RecipeSession::open("lasagna", lasagna(), None, &mut store);
    assert_eq!(session.variant(), Some("classic"));

    session.set_variant("meat", &mut store);
    assert_eq!(session.variant(), Some("meat"));
    assert_eq!(store.variant_preference("lasagna").as_deref(), Some("meat"));
}

#[test]
fn test_filter_follows_active_variant() {
    let recipe = lasagna();

    let veg = filter_sections(&recipe.ingredients, Some("veg"));
    let names: Vec<&str> = veg[0].items.iter().map(|e| e.ingredient.as_str()).collect();
    assert_eq!(names, vec!["pasta", "spinach"]);

    let meat = filter_sections(&recipe.ingredients, Some("meat"));
    let names: Vec<&str> = meat[0].items.iter().map(|e| e.ingredient.as_str()).collect();
    assert_eq!(names, vec!["pasta", "beef"]);

    let steps = filter_entries(&recipe.instructions, Some("veg"));
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[1].image.as_deref(), Some("img/bake.webp"));
}
