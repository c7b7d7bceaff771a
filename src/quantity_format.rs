//! # Quantity Formatter
//!
//! Turns scaled ingredient amounts into display strings and picks the
//! singular or plural ingredient name.

use crate::localization::Translations;

/// Round to two decimal places
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format a scaled amount with at most two decimals and no trailing zeros
///
/// # Examples
///
/// ```rust
/// use recipe_portions::quantity_format::format_value;
///
/// assert_eq!(format_value(2.5), "2.5");
/// assert_eq!(format_value(2.0), "2");
/// assert_eq!(format_value(1.333), "1.33");
/// assert_eq!(format_value(0.0), "0");
/// ```
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let formatted = format!("{:.2}", round_to_hundredths(value));
    if !formatted.contains('.') {
        return formatted;
    }
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Pick the display name of an ingredient for a scaled amount.
///
/// A countable amount of exactly one (no unit) uses the `<key>_single` entry
/// of the `ingredients` dictionary. Every other case uses the base entry,
/// which holds the plural form. Missing entries fall back to the raw key.
pub fn pluralize(
    translations: &Translations,
    ingredient_key: &str,
    scaled_value: f64,
    unit: Option<&str>,
) -> String {
    let countable = unit.map_or(true, str::is_empty);
    let base_path = format!("ingredients.{ingredient_key}");

    if countable && scaled_value == 1.0 {
        let singular_path = format!("ingredients.{ingredient_key}_single");
        if let Some(singular) = translations.lookup(&singular_path) {
            return singular.to_string();
        }
    }

    translations.t_or(&base_path, ingredient_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn translations() -> Translations {
        Translations::new(
            "en",
            json!({"ingredients": {"egg": "eggs", "egg_single": "egg", "flour": "flour"}}),
        )
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(2.5), "2.5");
        assert_eq!(format_value(2.0), "2");
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(1.333), "1.33");
        assert_eq!(format_value(100.0), "100");
        assert_eq!(format_value(0.125), "0.13");
    }

    #[test]
    fn test_format_tiny_value() {
        assert_eq!(format_value(0.001), "0");
    }

    #[test]
    fn test_pluralize_singular() {
        let tr = translations();
        assert_eq!(pluralize(&tr, "egg", 1.0, None), "egg");
        assert_eq!(pluralize(&tr, "egg", 2.0, None), "eggs");
    }

    #[test]
    fn test_pluralize_near_one_is_plural() {
        let tr = translations();
        assert_eq!(pluralize(&tr, "egg", 1.004, None), "eggs");
        assert_eq!(pluralize(&tr, "egg", 0.996, None), "eggs");
    }

    #[test]
    fn test_pluralize_with_unit_uses_base() {
        let tr = translations();
        assert_eq!(pluralize(&tr, "egg", 1.0, Some("piece")), "eggs");
    }

    #[test]
    fn test_pluralize_fallbacks() {
        let tr = translations();
        assert_eq!(pluralize(&tr, "flour", 1.0, None), "flour");
        assert_eq!(pluralize(&tr, "saffron", 1.0, None), "saffron");
        assert_eq!(pluralize(&tr, "saffron", 3.0, Some("g")), "saffron");
    }
}
