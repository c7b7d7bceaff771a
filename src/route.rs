//! Recipe and variant identifiers carried in the location hash,
//! e.g. `#recipe=brownies&variant=vegan`. Values are percent-encoded, with
//! `+` standing for a space as in form-encoded query strings.

use log::warn;
use std::borrow::Cow;

fn decode_value(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            warn!("Keeping undecodable route value '{}': {}", raw, e);
            spaced
        }
    }
}

fn encode_value(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// Identifiers handed to the engine by the router
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route {
    pub recipe: Option<String>,
    pub variant: Option<String>,
}

impl Route {
    /// Parse a location hash; anything but a recipe hash selects nothing
    pub fn parse(hash: &str) -> Self {
        let Some(params) = hash.strip_prefix('#').filter(|p| p.starts_with("recipe=")) else {
            return Self::default();
        };

        let mut route = Self::default();
        for pair in params.split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            if value.is_empty() {
                continue;
            }
            match key {
                "recipe" if route.recipe.is_none() => route.recipe = Some(decode_value(value)),
                "variant" if route.variant.is_none() => route.variant = Some(decode_value(value)),
                _ => {}
            }
        }
        route
    }

    /// Build the location hash for a selection; empty when nothing is selected
    pub fn to_hash(&self) -> String {
        match (&self.recipe, &self.variant) {
            (Some(recipe), Some(variant)) if !variant.is_empty() => {
                format!(
                    "#recipe={}&variant={}",
                    encode_value(recipe),
                    encode_value(variant)
                )
            }
            (Some(recipe), _) => format!("#recipe={}", encode_value(recipe)),
            (None, _) => String::new(),
        }
    }
}
