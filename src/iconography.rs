//! # Ingredient Iconography
//!
//! Chooses the symbol shown in front of an ingredient row. An explicit
//! key → symbol map (loaded from `emoji.json`) is consulted first, then an
//! ordered table of patterns where the first match wins.

use anyhow::Result;
use lazy_static::lazy_static;
use log::trace;
use regex::Regex;
use std::collections::HashMap;

/// Symbol used when nothing matches
pub const DEFAULT_ICON: &str = "•";

// Ordered (pattern, symbol) rules; more specific patterns come first.
// Short words are matched as whole `_`-separated key segments.
const ICON_RULES: &[(&str, &str)] = &[
    (r"(?i)egg_?white|egg_?yolk|^eggs?$|^egg_", "🥚"),
    (r"(?i)peanut", "🥜"),
    (r"(?i)chocolate|cocoa", "🍫"),
    (r"(?i)butter", "🧈"),
    (r"(?i)cheese|parmesan|mozzarella|feta", "🧀"),
    (r"(?i)milk|cream|yogh?urt", "🥛"),
    (r"(?i)flour|(?:^|_)oats?(?:_|$)|oatmeal|semolina", "🌾"),
    (r"(?i)sugar|honey|syrup", "🍯"),
    (r"(?i)salt", "🧂"),
    (r"(?i)apple", "🍎"),
    (r"(?i)lemon|lime", "🍋"),
    (r"(?i)banana", "🍌"),
    (r"(?i)strawberr|raspberr|berr", "🍓"),
    (r"(?i)tomato", "🍅"),
    (r"(?i)onion|shallot", "🧅"),
    (r"(?i)garlic", "🧄"),
    (r"(?i)carrot", "🥕"),
    (r"(?i)potato", "🥔"),
    (r"(?i)pepper|chili", "🌶️"),
    (r"(?i)beef|pork|lamb|bacon|(?:^|_)ham(?:_|$)|sausage", "🥩"),
    (r"(?i)chicken|turkey", "🍗"),
    (r"(?i)fish|salmon|tuna|shrimp", "🐟"),
    (r"(?i)rice", "🍚"),
    (r"(?i)pasta|noodle|spaghetti", "🍝"),
    (r"(?i)bread|bun|baguette", "🍞"),
    (r"(?i)oil", "🫒"),
    (r"(?i)water", "💧"),
    (r"(?i)wine", "🍷"),
    (r"(?i)herb|basil|parsley|thyme|rosemary|mint", "🌿"),
];

lazy_static! {
    static ref DEFAULT_RULES: Vec<IconRule> = ICON_RULES
        .iter()
        .map(|(pattern, symbol)| IconRule {
            pattern: Regex::new(pattern).expect("Icon rule pattern should be valid"),
            symbol: (*symbol).to_string(),
        })
        .collect();
}

/// A single pattern → symbol rule
#[derive(Debug, Clone)]
pub struct IconRule {
    pub pattern: Regex,
    pub symbol: String,
}

/// Lookup table for ingredient symbols
#[derive(Debug, Clone)]
pub struct IconTable {
    overrides: HashMap<String, String>,
    rules: Vec<IconRule>,
}

impl IconTable {
    /// Table with the built-in rules and no explicit overrides
    pub fn new() -> Self {
        Self {
            overrides: HashMap::new(),
            rules: DEFAULT_RULES.clone(),
        }
    }

    /// Table with explicit overrides parsed from an `emoji.json` document
    pub fn with_overrides_json(json: &str) -> Result<Self> {
        let overrides: HashMap<String, String> = serde_json::from_str(json)?;
        Ok(Self {
            overrides,
            rules: DEFAULT_RULES.clone(),
        })
    }

    /// Table with custom rules, evaluated in order
    pub fn with_rules(rules: Vec<(String, String)>) -> Result<Self, regex::Error> {
        let rules = rules
            .into_iter()
            .map(|(pattern, symbol)| {
                Ok(IconRule {
                    pattern: Regex::new(&pattern)?,
                    symbol,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self {
            overrides: HashMap::new(),
            rules,
        })
    }

    /// Symbol for an ingredient key
    pub fn icon_for(&self, ingredient_key: &str) -> &str {
        if let Some(symbol) = self.overrides.get(ingredient_key) {
            return symbol;
        }
        match self
            .rules
            .iter()
            .find(|rule| rule.pattern.is_match(ingredient_key))
        {
            Some(rule) => {
                trace!("Icon rule '{}' matched '{}'", rule.pattern, ingredient_key);
                &rule.symbol
            }
            None => DEFAULT_ICON,
        }
    }
}

impl Default for IconTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_rules() {
        let table = IconTable::new();
        assert_eq!(table.icon_for("egg"), "🥚");
        assert_eq!(table.icon_for("brown_sugar"), "🍯");
        assert_eq!(table.icon_for("dark_chocolate"), "🍫");
        assert_eq!(table.icon_for("unobtainium"), DEFAULT_ICON);
    }

    #[test]
    fn test_first_match_wins() {
        // "peanut_butter" matches both the peanut and butter rules
        let table = IconTable::new();
        assert_eq!(table.icon_for("peanut_butter"), "🥜");
    }

    #[test]
    fn test_short_words_match_whole_segments() {
        let table = IconTable::new();
        assert_eq!(table.icon_for("ham"), "🥩");
        assert_eq!(table.icon_for("smoked_ham"), "🥩");
        assert_eq!(table.icon_for("graham_crackers"), DEFAULT_ICON);
        assert_eq!(table.icon_for("rolled_oats"), "🌾");
        assert_eq!(table.icon_for("oatmeal"), "🌾");
        assert_eq!(table.icon_for("goat"), DEFAULT_ICON);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let table = IconTable::with_overrides_json(r#"{"butter": "🐄"}"#).unwrap();
        assert_eq!(table.icon_for("butter"), "🐄");
        assert_eq!(table.icon_for("salted_butter"), "🧈");
    }

    #[test]
    fn test_custom_rules_order() {
        let table = IconTable::with_rules(vec![
            ("berry".to_string(), "B".to_string()),
            ("straw".to_string(), "S".to_string()),
        ])
        .unwrap();
        assert_eq!(table.icon_for("strawberry"), "B");
        assert_eq!(table.icon_for("straw"), "S");
    }

    #[test]
    fn test_invalid_custom_rule() {
        assert!(IconTable::with_rules(vec![("(".to_string(), "x".to_string())]).is_err());
    }
}
