//! # Portion Configuration Module
//!
//! This module defines configuration structures for portion scaling,
//! including default target yields, stepping bounds and application settings.

use std::env;
use std::path::PathBuf;

// Default target yields used when no preference has been stored yet
pub const DEFAULT_SERVINGS: u32 = 4;
pub const DEFAULT_UNITS: u32 = 1;
pub const DEFAULT_DIAMETER: u32 = 15;
pub const DEFAULT_WIDTH: u32 = 20;
pub const DEFAULT_HEIGHT: u32 = 20;

// Environment variables read by the binary
pub const RECIPES_DIR_VAR: &str = "RECIPES_DIR";
pub const PREFERENCES_PATH_VAR: &str = "PREFERENCES_PATH";
pub const RECIPE_LANG_VAR: &str = "RECIPE_LANG";

/// Inclusive bounds for a stepped yield value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepBounds {
    pub min: u32,
    pub max: u32,
}

impl StepBounds {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Clamp a value into these bounds
    pub fn clamp(&self, value: u32) -> u32 {
        value.clamp(self.min, self.max)
    }
}

/// Configuration for portion defaults and increment/decrement limits
#[derive(Debug, Clone)]
pub struct PortionConfig {
    /// Servings used when neither global nor per-recipe preferences exist
    pub default_servings: u32,
    /// Item count used when no preference exists
    pub default_units: u32,
    /// Pan diameter used when no preference exists
    pub default_diameter: u32,
    /// Rectangular pan width used when no preference exists
    pub default_width: u32,
    /// Rectangular pan height used when no preference exists
    pub default_height: u32,
    /// Bounds for servings stepping
    pub servings_bounds: StepBounds,
    /// Bounds for unit count stepping
    pub units_bounds: StepBounds,
    /// Bounds for diameter stepping (legacy diameter and circular area)
    pub diameter_bounds: StepBounds,
    /// Bounds for each side of a rectangular pan
    pub side_bounds: StepBounds,
}

impl Default for PortionConfig {
    fn default() -> Self {
        Self {
            default_servings: DEFAULT_SERVINGS,
            default_units: DEFAULT_UNITS,
            default_diameter: DEFAULT_DIAMETER,
            default_width: DEFAULT_WIDTH,
            default_height: DEFAULT_HEIGHT,
            servings_bounds: StepBounds::new(1, 20),
            units_bounds: StepBounds::new(1, 100),
            diameter_bounds: StepBounds::new(5, 50),
            side_bounds: StepBounds::new(5, 100),
        }
    }
}

/// Application settings for the command line front-end
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding `index.json`, `recipes/` and `translations/`
    pub recipes_dir: PathBuf,
    /// JSON file backing the preference store
    pub preferences_path: PathBuf,
    /// Preferred language code, possibly with a region (e.g. "fr-CA")
    pub language: Option<String>,
}

impl AppConfig {
    /// Build the configuration from environment variables, falling back to
    /// paths relative to the working directory.
    pub fn from_env() -> Self {
        let recipes_dir = env::var(RECIPES_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./docs"));
        let preferences_path = env::var(PREFERENCES_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./preferences.json"));
        let language = env::var(RECIPE_LANG_VAR).ok();

        Self {
            recipes_dir,
            preferences_path,
            language,
        }
    }
}
