//! # Variant Selector
//!
//! Picks which recipe variant is displayed when a recipe is opened:
//!
//! 1. a variant key passed in explicitly (navigation parameter), which is
//!    also remembered for the recipe;
//! 2. the variant remembered for the recipe;
//! 3. the first variant declared by the recipe;
//! 4. no variant.

use log::{debug, warn};

use crate::preferences::{KeyValueStore, PreferenceStore};
use crate::recipe_model::Recipe;

/// Resolve the active variant for a freshly opened recipe
pub fn select_variant<S: KeyValueStore>(
    recipe: &Recipe,
    explicit_key: Option<&str>,
    recipe_id: &str,
    preferences: &mut PreferenceStore<S>,
) -> Option<String> {
    if let Some(key) = explicit_key.filter(|key| !key.is_empty()) {
        debug!("Using explicit variant '{}' for '{}'", key, recipe_id);
        record_variant_choice(recipe_id, key, preferences);
        return Some(key.to_string());
    }

    if let Some(saved) = preferences.variant_preference(recipe_id) {
        debug!("Using remembered variant '{}' for '{}'", saved, recipe_id);
        return Some(saved);
    }

    recipe.variants.first().map(|variant| variant.key.clone())
}

/// Remember an explicit variant choice; storage failures are only logged
pub fn record_variant_choice<S: KeyValueStore>(
    recipe_id: &str,
    variant_key: &str,
    preferences: &mut PreferenceStore<S>,
) {
    if let Err(e) = preferences.save_variant_preference(recipe_id, variant_key) {
        warn!(
            "Could not remember variant '{}' for '{}': {}",
            variant_key, recipe_id, e
        );
    }
}
