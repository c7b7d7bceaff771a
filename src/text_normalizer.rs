//! # Text Normalizer
//!
//! Case folding and diacritic stripping used by recipe search, so that
//! "Crème brûlée" is found by typing "creme brulee".

use unicode_normalization::UnicodeNormalization;

/// Whether a character belongs to the Combining Diacritical Marks block
fn is_combining_diacritic(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// Lower-case a string and remove combining diacritical marks
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_diacritic(*c))
        .collect()
}

/// Accent- and case-insensitive substring test
pub fn contains_normalized(haystack: &str, needle: &str) -> bool {
    normalize_text(haystack).contains(&normalize_text(needle))
}
