//! # Recipe Index
//!
//! Builds the browsable recipe index from recipe documents: one entry per
//! document with its title, categories, path and the ingredient keys used by
//! ingredient search. Entries are sorted by lower-cased English title.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::portion_errors::PortionError;
use crate::recipe_model::LocalizedField;

/// Directory prefix of recipe documents, relative to the site root
pub const RECIPES_PREFIX: &str = "recipes/";

/// One recipe in the index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub title: LocalizedField,
    #[serde(default)]
    pub categories: Vec<String>,
    pub path: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub ingredient_keys: Vec<String>,
}

impl IndexEntry {
    /// Recipe identifier: the document file name without directory or extension
    pub fn recipe_name(&self) -> &str {
        let name = self.path.strip_prefix(RECIPES_PREFIX).unwrap_or(&self.path);
        name.strip_suffix(".json").unwrap_or(name)
    }
}

fn ingredient_keys_of(items: &[Value]) -> impl Iterator<Item = String> + '_ {
    items
        .iter()
        .filter_map(|item| item.get("ingredient")?.as_str().map(str::to_string))
}

/// Build an index entry from a parsed recipe document
pub fn index_entry_from_document(file_name: &str, document: &Value) -> Result<IndexEntry, PortionError> {
    let title = match document.get("title") {
        Some(Value::String(title)) => {
            let mut map = HashMap::new();
            map.insert("en".to_string(), title.clone());
            LocalizedField::Translated(map)
        }
        Some(title @ Value::Object(_)) => serde_json::from_value(title.clone())?,
        _ => {
            return Err(PortionError::Document(format!(
                "{file_name}: missing or invalid title"
            )))
        }
    };

    let categories = document
        .get("categories")
        .and_then(|c| serde_json::from_value(c.clone()).ok())
        .unwrap_or_default();
    let text_field = |key: &str| {
        document
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    let ingredients = document
        .get("ingredients")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let grouped = ingredients
        .first()
        .is_some_and(|first| first.get("group").is_some());
    let ingredient_keys: Vec<String> = if grouped {
        ingredients
            .iter()
            .filter_map(|group| group.get("items")?.as_array())
            .flat_map(|items| ingredient_keys_of(items))
            .collect()
    } else {
        ingredient_keys_of(ingredients).collect()
    };

    Ok(IndexEntry {
        title,
        categories,
        path: format!("{RECIPES_PREFIX}{file_name}"),
        image: text_field("image"),
        author: text_field("author"),
        ingredient_keys,
    })
}

/// Build a sorted index from `(file name, JSON text)` pairs.
///
/// Documents that are not valid JSON or have no title are skipped with a
/// warning.
pub fn build_index<I>(documents: I) -> Vec<IndexEntry>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut index = Vec::new();

    for (file_name, content) in documents {
        let parsed = serde_json::from_str::<Value>(&content)
            .map_err(PortionError::from)
            .and_then(|document| index_entry_from_document(&file_name, &document));
        match parsed {
            Ok(entry) => index.push(entry),
            Err(e) => warn!("Skipping {}: {}", file_name, e),
        }
    }

    index.sort_by_key(|entry| entry.title.resolve("en").to_lowercase());
    info!("Built recipe index with {} recipes", index.len());
    index
}

/// All categories used in the index, in order of first appearance
pub fn collect_categories(index: &[IndexEntry]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for category in index.iter().flat_map(|entry| entry.categories.iter()) {
        if !categories.contains(category) {
            categories.push(category.clone());
        }
    }
    categories
}

/// Find an entry by recipe identifier
pub fn find_by_name<'a>(index: &'a [IndexEntry], recipe_name: &str) -> Option<&'a IndexEntry> {
    index.iter().find(|entry| entry.recipe_name() == recipe_name)
}
