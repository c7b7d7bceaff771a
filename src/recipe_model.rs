//! # Recipe Document Model
//!
//! Serde structures for recipe documents as shipped next to the viewer. A
//! document is deserialized through [`RecipeDocument`], which accepts both the
//! unified `portion` field and the legacy yield fields, and is then folded into
//! a [`Recipe`] whose portion has a single representation.
//!
//! ```rust
//! use recipe_portions::recipe_model::Recipe;
//!
//! let recipe = Recipe::from_json(r#"{
//!     "title": {"en": "Pancakes", "fr": "Crêpes"},
//!     "servings": {"value": 4, "unit": "persons"},
//!     "ingredients": [{"ingredient": "flour", "value": 250, "unit": "g"}]
//! }"#).unwrap();
//!
//! assert_eq!(recipe.title.resolve("fr"), "Crêpes");
//! assert!(recipe.portion.is_some());
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::portion_errors::PortionError;
use crate::portion_model::{normalize_portion, Portion, PortionDocument, YieldValue};

/// Text that is either plain or translated per language code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedField {
    Plain(String),
    Translated(HashMap<String, String>),
}

impl LocalizedField {
    /// Resolve for a language, falling back to English, then to an empty string
    pub fn resolve(&self, language: &str) -> &str {
        match self {
            LocalizedField::Plain(text) => text,
            LocalizedField::Translated(map) => map
                .get(language)
                .filter(|text| !text.is_empty())
                .or_else(|| map.get("en"))
                .map(String::as_str)
                .unwrap_or(""),
        }
    }
}

impl Default for LocalizedField {
    fn default() -> Self {
        LocalizedField::Plain(String::new())
    }
}

impl From<&str> for LocalizedField {
    fn from(text: &str) -> Self {
        LocalizedField::Plain(text.to_string())
    }
}

/// Variant restriction on an entry: one key or a list of keys
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VariantConstraint {
    Single(String),
    Many(Vec<String>),
}

impl VariantConstraint {
    /// Whether the given variant key is allowed by this constraint
    pub fn allows(&self, key: &str) -> bool {
        match self {
            VariantConstraint::Single(allowed) => allowed == key,
            VariantConstraint::Many(allowed) => allowed.iter().any(|k| k == key),
        }
    }
}

/// A single ingredient line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientEntry {
    /// Translation key of the ingredient (e.g. "egg", "flour")
    pub ingredient: String,
    /// Quantity for the baseline portion; zero means "no amount shown"
    #[serde(default)]
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Free text shown after the name (e.g. "softened")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<LocalizedField>,
    #[serde(
        default,
        rename = "onlyForVariation",
        skip_serializing_if = "Option::is_none"
    )]
    pub only_for_variation: Option<VariantConstraint>,
}

/// A named subgroup of ingredients (e.g. "Dough", "Filling")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientGroup {
    pub group: LocalizedField,
    #[serde(default)]
    pub items: Vec<IngredientEntry>,
}

/// Ingredient list of a recipe, flat or grouped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IngredientSections {
    Grouped(Vec<IngredientGroup>),
    Flat(Vec<IngredientEntry>),
}

impl IngredientSections {
    /// Iterate over every ingredient entry, across groups
    pub fn entries(&self) -> Box<dyn Iterator<Item = &IngredientEntry> + '_> {
        match self {
            IngredientSections::Grouped(groups) => {
                Box::new(groups.iter().flat_map(|group| group.items.iter()))
            }
            IngredientSections::Flat(items) => Box::new(items.iter()),
        }
    }
}

impl Default for IngredientSections {
    fn default() -> Self {
        IngredientSections::Flat(Vec::new())
    }
}

/// A single preparation step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructionEntry {
    pub text: LocalizedField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(
        default,
        rename = "onlyForVariation",
        skip_serializing_if = "Option::is_none"
    )]
    pub only_for_variation: Option<VariantConstraint>,
}

/// A named alternative subset of ingredients and instructions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub key: String,
    pub name: LocalizedField,
}

/// A recipe document exactly as stored, before portion normalization
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeDocument {
    #[serde(default)]
    pub title: LocalizedField,
    #[serde(default)]
    pub categories: Vec<String>,
    /// Raw value; objects matching no portion type normalize to no portion
    #[serde(default)]
    pub portion: Option<serde_json::Value>,
    #[serde(default)]
    pub servings: Option<YieldValue>,
    #[serde(default)]
    pub units: Option<YieldValue>,
    #[serde(default)]
    pub diameter: Option<YieldValue>,
    #[serde(default)]
    pub ingredients: IngredientSections,
    #[serde(default)]
    pub instructions: Vec<InstructionEntry>,
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub ingredient_keys: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

/// A loaded recipe with a single portion representation
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RecipeDocument")]
pub struct Recipe {
    pub title: LocalizedField,
    pub categories: Vec<String>,
    pub portion: Option<Portion>,
    pub ingredients: IngredientSections,
    pub instructions: Vec<InstructionEntry>,
    pub variants: Vec<Variant>,
    pub ingredient_keys: Vec<String>,
    pub image: Option<String>,
    pub author: Option<String>,
}

impl From<RecipeDocument> for Recipe {
    fn from(document: RecipeDocument) -> Self {
        let portion = normalize_portion(
            document.portion.map(PortionDocument::from_value),
            document.servings,
            document.units,
            document.diameter,
        );

        Self {
            title: document.title,
            categories: document.categories,
            portion,
            ingredients: document.ingredients,
            instructions: document.instructions,
            variants: document.variants,
            ingredient_keys: document.ingredient_keys,
            image: document.image,
            author: document.author,
        }
    }
}

impl Recipe {
    /// Parse a recipe from its JSON document
    pub fn from_json(json: &str) -> Result<Self, PortionError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }

    /// Ingredient keys for search, derived from the entries when not declared
    pub fn search_keys(&self) -> Vec<String> {
        if !self.ingredient_keys.is_empty() {
            return self.ingredient_keys.clone();
        }
        self.ingredients
            .entries()
            .map(|entry| entry.ingredient.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portion_model::PortionKind;

    #[test]
    fn test_localized_field_fallback() {
        let mut map = HashMap::new();
        map.insert("en".to_string(), "Apple pie".to_string());
        map.insert("fr".to_string(), "Tarte aux pommes".to_string());
        let field = LocalizedField::Translated(map);

        assert_eq!(field.resolve("fr"), "Tarte aux pommes");
        assert_eq!(field.resolve("de"), "Apple pie");
        assert_eq!(LocalizedField::from("Plain").resolve("fr"), "Plain");
    }

    #[test]
    fn test_localized_field_without_english() {
        let mut map = HashMap::new();
        map.insert("fr".to_string(), "Gâteau".to_string());
        let field = LocalizedField::Translated(map);

        assert_eq!(field.resolve("de"), "");
    }

    #[test]
    fn test_variant_constraint_forms() {
        let single: VariantConstraint = serde_json::from_str(r#""veg""#).unwrap();
        let many: VariantConstraint = serde_json::from_str(r#"["veg", "vegan"]"#).unwrap();

        assert!(single.allows("veg"));
        assert!(!single.allows("meat"));
        assert!(many.allows("vegan"));
        assert!(!many.allows("meat"));
    }

    #[test]
    fn test_grouped_ingredients() {
        let recipe = Recipe::from_json(
            r#"{
                "title": "Tart",
                "ingredients": [
                    {"group": {"en": "Dough"}, "items": [{"ingredient": "flour", "value": 200, "unit": "g"}]},
                    {"group": {"en": "Filling"}, "items": [{"ingredient": "apple", "value": 3}]}
                ]
            }"#,
        )
        .unwrap();

        assert!(matches!(recipe.ingredients, IngredientSections::Grouped(ref g) if g.len() == 2));
        assert_eq!(recipe.search_keys(), vec!["flour", "apple"]);
    }

    #[test]
    fn test_flat_ingredients_with_variation() {
        let recipe = Recipe::from_json(
            r#"{
                "title": "Chili",
                "portion": {"type": "servings", "value": 4, "unit": "persons"},
                "ingredients": [
                    {"ingredient": "beans", "value": 400, "unit": "g"},
                    {"ingredient": "beef", "value": 500, "unit": "g", "onlyForVariation": "meat"}
                ],
                "variants": [{"key": "meat", "name": "Meat"}, {"key": "veg", "name": {"en": "Veggie"}}]
            }"#,
        )
        .unwrap();

        assert_eq!(recipe.portion.as_ref().unwrap().kind(), PortionKind::Servings);
        assert!(recipe.has_variants());
        let entries: Vec<_> = recipe.ingredients.entries().collect();
        assert_eq!(entries.len(), 2);
        assert!(entries[1].only_for_variation.is_some());
    }

    #[test]
    fn test_malformed_portion_still_loads() {
        let untyped = Recipe::from_json(
            r#"{"title": "Stew", "portion": {"value": 4, "unit": "persons"}}"#,
        )
        .unwrap();
        assert!(untyped.portion.is_none());

        let hexagon = Recipe::from_json(
            r#"{
                "title": "Tart",
                "portion": {"type": "area", "shape": "hexagon", "dimensions": {"diameter": 20}, "unit": "cm"},
                "servings": {"value": 4, "unit": "persons"},
                "ingredients": [{"ingredient": "flour", "value": 200, "unit": "g"}]
            }"#,
        )
        .unwrap();
        assert!(hexagon.portion.is_none());
        assert_eq!(hexagon.search_keys(), vec!["flour"]);
    }

    #[test]
    fn test_invalid_document() {
        let result = Recipe::from_json(r#"{"title": 12}"#);
        assert!(matches!(result, Err(PortionError::Document(_))));
    }
}
