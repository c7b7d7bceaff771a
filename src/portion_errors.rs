//! # Portion Error Types Module
//!
//! This module defines the error types shared by the preference store, the
//! recipe document loader and the recipe index builder. The scaling math
//! itself never fails: degenerate inputs resolve to neutral values instead.

/// Custom error types for portion and preference operations
#[derive(Debug, Clone)]
pub enum PortionError {
    /// Stored preference data that could not be parsed
    PreferenceParse(String),
    /// Failures reading or writing the persistent key/value surface
    Storage(String),
    /// Recipe documents that could not be deserialized
    Document(String),
    /// A recipe identifier that is not present in the index
    RecipeNotFound(String),
}

impl std::fmt::Display for PortionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortionError::PreferenceParse(msg) => write!(f, "Preference parse error: {msg}"),
            PortionError::Storage(msg) => write!(f, "Storage error: {msg}"),
            PortionError::Document(msg) => write!(f, "Recipe document error: {msg}"),
            PortionError::RecipeNotFound(name) => write!(f, "Recipe not found: {name}"),
        }
    }
}

impl std::error::Error for PortionError {}

impl From<anyhow::Error> for PortionError {
    fn from(err: anyhow::Error) -> Self {
        PortionError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for PortionError {
    fn from(err: serde_json::Error) -> Self {
        PortionError::Document(err.to_string())
    }
}
