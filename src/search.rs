//! # Search/Filter Engine
//!
//! Filters the recipe index by a free-text query and an optional category.
//!
//! - A plain query such as `"tart, cake"` matches recipes whose title contains
//!   **any** of the comma-separated terms.
//! - A query starting with the localized ingredients label and a colon, such
//!   as `"ingredients: flour, sugar"`, matches recipes where **every** term is
//!   found in some ingredient name (plural or singular form).
//!
//! Comparisons ignore case and accents.

use log::debug;

use crate::localization::Translations;
use crate::recipe_index::IndexEntry;
use crate::text_normalizer::normalize_text;

/// Label used when the dictionary has no `ingredients._` entry
const FALLBACK_INGREDIENTS_LABEL: &str = "ingredients";

/// Which field of a recipe a query is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Any term in the title
    Title,
    /// Every term in some ingredient name
    Ingredients,
}

/// A parsed, normalized search query
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub mode: SearchMode,
    /// Normalized, non-empty terms
    pub terms: Vec<String>,
}

fn split_terms(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(normalize_text)
        .collect()
}

/// The prefix that turns a query into an ingredient search, e.g. `"ingredients:"`
pub fn ingredient_search_prefix(translations: &Translations) -> String {
    let label = translations.t_or("ingredients._", FALLBACK_INGREDIENTS_LABEL);
    format!("{label}:")
}

impl SearchQuery {
    /// Parse a raw query; a blank query yields `None` (matches everything)
    pub fn parse(query: &str, translations: &Translations) -> Option<Self> {
        if query.trim().is_empty() {
            return None;
        }

        let prefix = ingredient_search_prefix(translations).to_lowercase();
        let is_ingredient_search = query.to_lowercase().starts_with(&prefix);

        let (mode, remainder) = if is_ingredient_search {
            let after_colon = query
                .split_once(':')
                .map_or(query, |(_, rest)| rest);
            (SearchMode::Ingredients, after_colon)
        } else {
            (SearchMode::Title, query)
        };

        Some(Self {
            mode,
            terms: split_terms(remainder),
        })
    }

    /// Whether an index entry matches this query
    pub fn matches(&self, entry: &IndexEntry, translations: &Translations) -> bool {
        match self.mode {
            SearchMode::Title => {
                let title = normalize_text(&translations.translate_field(&entry.title));
                self.terms.iter().any(|term| title.contains(term.as_str()))
            }
            SearchMode::Ingredients => {
                let names = ingredient_names(entry, translations);
                self.terms
                    .iter()
                    .all(|term| names.iter().any(|name| name.contains(term.as_str())))
            }
        }
    }
}

/// Normalized display names of an entry's ingredients, with singular forms
fn ingredient_names(entry: &IndexEntry, translations: &Translations) -> Vec<String> {
    let mut names = Vec::with_capacity(entry.ingredient_keys.len());
    for key in &entry.ingredient_keys {
        let base = translations.t_or(&format!("ingredients.{key}"), key);
        if let Some(singular) = translations.lookup(&format!("ingredients.{key}_single")) {
            if singular != base {
                names.push(normalize_text(singular));
            }
        }
        names.push(normalize_text(&base));
    }
    names
}

/// Filter the index by query and category; both conditions must hold
pub fn filter_index<'a>(
    index: &'a [IndexEntry],
    query: &str,
    category: Option<&str>,
    translations: &Translations,
) -> Vec<&'a IndexEntry> {
    let parsed = SearchQuery::parse(query, translations);
    let category = category.filter(|c| !c.is_empty());

    let results: Vec<&IndexEntry> = index
        .iter()
        .filter(|entry| {
            let match_search = parsed
                .as_ref()
                .map_or(true, |q| q.matches(entry, translations));
            let match_category =
                category.map_or(true, |c| entry.categories.iter().any(|cat| cat == c));
            match_search && match_category
        })
        .collect();

    debug!(
        "Search '{}' (category {:?}) matched {} of {} recipes",
        query,
        category,
        results.len(),
        index.len()
    );
    results
}
