//! # Recipe Portions
//!
//! Portion scaling and content variants for a recipe viewer: recomputes
//! ingredient quantities for a target yield (servings, item count, pan
//! diameter or pan area), selects the displayed recipe variant, remembers the
//! user's choices and searches the recipe index.

pub mod content_filter;
pub mod iconography;
pub mod localization;
pub mod multiplier;
pub mod portion_config;
pub mod portion_errors;
pub mod portion_model;
pub mod preferences;
pub mod quantity_format;
pub mod recipe_index;
pub mod recipe_model;
pub mod recipe_view;
pub mod route;
pub mod search;
pub mod shape_converter;
pub mod text_normalizer;
pub mod variant_selector;
