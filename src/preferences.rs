//! # Preference Store
//!
//! Persists the user's yield choices at two scopes and merges them into a
//! fresh [`WorkingPortionState`] when a recipe is opened.
//!
//! - **Global** values (`preferredServings`, `preferredDiameter`,
//!   `preferredUnits`, `preferredDimensions`) are shared by every recipe and
//!   act as the fallback for recipes never adjusted before.
//! - **Per-recipe** values (`recipePreferences:<id>`) override the global ones
//!   for one recipe. They are only kept for unit-count and area recipes.
//! - **Variant choices** live in a single `variantPreferences` map.
//!
//! Stored values that fail to parse, and stored yields of zero, are ignored;
//! the defaults already present in the state are kept. Every mutating call writes through
//! to the backing [`KeyValueStore`] immediately.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::portion_config::PortionConfig;
use crate::portion_errors::PortionError;
use crate::portion_model::{Dimensions, Portion, Shape, WorkingPortionState};

pub const SERVINGS_KEY: &str = "preferredServings";
pub const DIAMETER_KEY: &str = "preferredDiameter";
pub const UNITS_KEY: &str = "preferredUnits";
pub const DIMENSIONS_KEY: &str = "preferredDimensions";
pub const RECIPE_KEY_PREFIX: &str = "recipePreferences:";
pub const VARIANT_KEY: &str = "variantPreferences";

/// Persistent string key/value surface
pub trait KeyValueStore {
    /// Read a raw value
    fn get(&self, key: &str) -> Option<String>;
    /// Write a raw value, flushing it before returning
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Volatile store, used in tests and when no file is configured
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    values: HashMap<String, String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a single JSON object on disk
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl JsonFileStore {
    /// Open a store file; a missing file starts empty, and so does a corrupt one
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let values = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read preferences from {}", path.display()))?;
            match serde_json::from_str(&content) {
                Ok(values) => values,
                Err(e) => {
                    warn!(
                        "Ignoring unreadable preferences file {}: {}",
                        path.display(),
                        e
                    );
                    HashMap::new()
                }
            }
        } else {
            info!("No preferences file at {}, starting empty", path.display());
            HashMap::new()
        };

        Ok(Self { path, values })
    }

    fn flush(&self) -> Result<()> {
        let content =
            serde_json::to_string_pretty(&self.values).context("Failed to encode preferences")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write preferences to {}", self.path.display()))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

/// Yield choices remembered for a single recipe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipePreference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape: Option<Shape>,
}

/// The recipe a load or save applies to
#[derive(Debug, Clone, Copy)]
pub struct RecipeContext<'a> {
    pub id: &'a str,
    pub portion: Option<&'a Portion>,
}

impl<'a> RecipeContext<'a> {
    pub fn new(id: &'a str, portion: Option<&'a Portion>) -> Self {
        Self { id, portion }
    }

    fn keeps_per_recipe_preferences(&self) -> bool {
        self.portion
            .is_some_and(Portion::has_per_recipe_preferences)
    }
}

fn non_zero(value: u32) -> Option<u32> {
    (value > 0).then_some(value)
}

/// Overlay stored dimensions field by field, skipping zero sides
fn merge_dimensions(current: &mut Dimensions, stored: Dimensions) {
    if let Some(width) = non_zero(stored.width) {
        current.width = width;
    }
    if let Some(height) = non_zero(stored.height) {
        current.height = height;
    }
    if let Some(diameter) = non_zero(stored.diameter) {
        current.diameter = diameter;
    }
}

/// Layered preference store over a key/value surface
#[derive(Debug)]
pub struct PreferenceStore<S: KeyValueStore> {
    kv: S,
    config: PortionConfig,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    pub fn new(kv: S) -> Self {
        Self::with_config(kv, PortionConfig::default())
    }

    pub fn with_config(kv: S, config: PortionConfig) -> Self {
        Self { kv, config }
    }

    pub fn config(&self) -> &PortionConfig {
        &self.config
    }

    /// Access the underlying key/value surface
    pub fn inner(&self) -> &S {
        &self.kv
    }

    /// Read and parse a stored value; parse failures are logged and ignored
    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.kv.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                let err = PortionError::PreferenceParse(format!("{key}: {e}"));
                warn!("{}", err);
                None
            }
        }
    }

    /// Read a stored yield count; zero counts as absent
    fn read_count(&self, key: &str) -> Option<u32> {
        let value = self.read_json::<u32>(key)?;
        if value == 0 {
            debug!("Ignoring zero value stored under {}", key);
        }
        non_zero(value)
    }

    fn write_json<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), PortionError> {
        let encoded = serde_json::to_string(value)
            .map_err(|e| PortionError::Storage(format!("{key}: {e}")))?;
        self.kv.set(key, &encoded)?;
        Ok(())
    }

    /// Build the working state for a recipe, or for no recipe at all.
    ///
    /// Defaults come from the configuration, the global scope overrides them,
    /// and for unit-count and area recipes the per-recipe entry overrides both.
    pub fn load(&self, context: Option<RecipeContext<'_>>) -> WorkingPortionState {
        let mut state = WorkingPortionState::with_defaults(&self.config);

        if let Some(servings) = self.read_count(SERVINGS_KEY) {
            state.current_servings = servings;
        }
        if let Some(diameter) = self.read_count(DIAMETER_KEY) {
            state.current_diameter = diameter;
        }
        if let Some(units) = self.read_count(UNITS_KEY) {
            state.current_units = units;
        }
        if let Some(dimensions) = self.read_json::<Dimensions>(DIMENSIONS_KEY) {
            merge_dimensions(&mut state.current_dimensions, dimensions);
        }

        if let Some(context) = context.filter(RecipeContext::keeps_per_recipe_preferences) {
            if let Some(preference) = self.recipe_preference(context.id) {
                debug!("Applying per-recipe preferences for '{}'", context.id);
                if let Some(servings) = preference.servings.and_then(non_zero) {
                    state.current_servings = servings;
                }
                if let Some(units) = preference.units.and_then(non_zero) {
                    state.current_units = units;
                }
                if let Some(diameter) = preference.diameter.and_then(non_zero) {
                    state.current_diameter = diameter;
                }
                if let Some(dimensions) = preference.dimensions {
                    merge_dimensions(&mut state.current_dimensions, dimensions);
                }
                if preference.shape.is_some() {
                    state.current_shape = preference.shape;
                }
            }
        }

        state
    }

    /// Persist the working state.
    ///
    /// The global scope is always written; the per-recipe scope only for
    /// unit-count and area recipes.
    pub fn save(
        &mut self,
        context: Option<RecipeContext<'_>>,
        state: &WorkingPortionState,
    ) -> Result<(), PortionError> {
        self.write_json(SERVINGS_KEY, &state.current_servings)?;
        self.write_json(DIAMETER_KEY, &state.current_diameter)?;
        self.write_json(UNITS_KEY, &state.current_units)?;
        self.write_json(DIMENSIONS_KEY, &state.current_dimensions)?;

        if let Some(context) = context.filter(RecipeContext::keeps_per_recipe_preferences) {
            let preference = RecipePreference {
                servings: Some(state.current_servings),
                units: Some(state.current_units),
                diameter: Some(state.current_diameter),
                dimensions: Some(state.current_dimensions),
                shape: state.displayed_shape(),
            };
            self.write_json(&format!("{RECIPE_KEY_PREFIX}{}", context.id), &preference)?;
            debug!("Saved per-recipe preferences for '{}'", context.id);
        }

        Ok(())
    }

    /// Stored per-recipe entry, if any
    pub fn recipe_preference(&self, recipe_id: &str) -> Option<RecipePreference> {
        self.read_json(&format!("{RECIPE_KEY_PREFIX}{recipe_id}"))
    }

    fn variant_preferences(&self) -> HashMap<String, String> {
        self.read_json(VARIANT_KEY).unwrap_or_default()
    }

    /// Previously chosen variant for a recipe
    pub fn variant_preference(&self, recipe_id: &str) -> Option<String> {
        self.variant_preferences()
            .remove(recipe_id)
            .filter(|key| !key.is_empty())
    }

    /// Remember the variant chosen for a recipe
    pub fn save_variant_preference(
        &mut self,
        recipe_id: &str,
        variant_key: &str,
    ) -> Result<(), PortionError> {
        let mut preferences = self.variant_preferences();
        preferences.insert(recipe_id.to_string(), variant_key.to_string());
        self.write_json(VARIANT_KEY, &preferences)
    }
}
