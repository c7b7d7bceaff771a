use anyhow::Result;
use log::debug;
use serde_json::Value;
use unic_langid::LanguageIdentifier;

use crate::recipe_model::LocalizedField;

/// Languages that ship a translation dictionary
pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "fr", "de"];

/// Fallback language for dictionaries and localized fields
pub const DEFAULT_LANGUAGE: &str = "en";

/// Translation dictionary for one language
///
/// Keys are dotted paths into a nested JSON object, e.g. `ingredients.egg`
/// or `connectors.for`.
#[derive(Debug, Clone)]
pub struct Translations {
    language: String,
    root: Value,
}

impl Translations {
    /// Create a dictionary from an already parsed JSON value
    pub fn new(language: &str, root: Value) -> Self {
        Self {
            language: language.to_string(),
            root,
        }
    }

    /// Parse a dictionary from its JSON text
    pub fn from_json(language: &str, json: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(json)?;
        Ok(Self::new(language, root))
    }

    /// An empty dictionary: every lookup misses
    pub fn empty(language: &str) -> Self {
        Self::new(language, Value::Object(Default::default()))
    }

    /// The language this dictionary is for
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Walk a dotted path; returns `None` unless it ends on a string
    pub fn lookup(&self, path: &str) -> Option<&str> {
        let mut node = &self.root;
        for part in path.split('.') {
            node = node.as_object()?.get(part)?;
        }
        node.as_str()
    }

    /// Get a localized message, falling back to the key itself
    pub fn t(&self, path: &str) -> String {
        self.t_or(path, path)
    }

    /// Get a localized message with an explicit fallback
    pub fn t_or(&self, path: &str, fallback: &str) -> String {
        match self.lookup(path) {
            Some(text) => text.to_string(),
            None => {
                debug!("Missing translation for '{}' ({})", path, self.language);
                fallback.to_string()
            }
        }
    }

    /// Resolve a localized document field in this dictionary's language
    pub fn translate_field(&self, field: &LocalizedField) -> String {
        field.resolve(&self.language).to_string()
    }
}

/// Reduce a language tag to a supported primary language code
pub fn detect_language(language_code: Option<&str>) -> String {
    let Some(code) = language_code else {
        return DEFAULT_LANGUAGE.to_string();
    };

    match code.parse::<LanguageIdentifier>() {
        Ok(langid) => {
            let primary = langid.language.as_str().to_lowercase();
            if SUPPORTED_LANGUAGES.contains(&primary.as_str()) {
                primary
            } else {
                DEFAULT_LANGUAGE.to_string()
            }
        }
        Err(_) => DEFAULT_LANGUAGE.to_string(),
    }
}
