//! # Portion Data Model
//!
//! This module defines how a recipe expresses its baseline yield and how the
//! user's target yield is held while a recipe is open.
//!
//! ## Core Concepts
//!
//! - **Portion**: the baseline yield a recipe's quantities are authored against
//! - **Shape**: the footprint of a pan for area-based yields
//! - **WorkingPortionState**: the user's current target yield for the open recipe
//!
//! Recipe documents may describe the baseline either with a unified `portion`
//! object or with legacy top-level `servings`/`units`/`diameter` objects.
//! [`normalize_portion`] folds both into a single [`Portion`] once, at load time.
//!
//! ```rust
//! use recipe_portions::portion_model::{Portion, PortionKind};
//!
//! let portion: Portion = serde_json::from_str(
//!     r#"{"type": "servings", "value": 4, "unit": "persons"}"#,
//! ).unwrap();
//! assert_eq!(portion.kind(), PortionKind::Servings);
//! ```

use log::warn;
use serde::{Deserialize, Serialize};

use crate::portion_config::PortionConfig;

/// Pan footprint for area-based yields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Circular,
    Rectangular,
    Square,
}

impl Shape {
    /// Whether the area of this shape is computed from a diameter
    pub fn is_circular(&self) -> bool {
        matches!(self, Shape::Circular)
    }
}

/// Dimensions of a baseline pan as written in the recipe document
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AreaDimensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

/// The baseline yield of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Portion {
    /// Yield measured in discrete servings
    Servings {
        value: f64,
        #[serde(default)]
        unit: String,
    },
    /// Yield measured in discrete item counts (cookies, rolls...)
    Units {
        value: f64,
        #[serde(default)]
        unit: String,
    },
    /// Legacy single pan diameter, scaled as an area
    Diameter {
        value: f64,
        #[serde(default)]
        unit: String,
    },
    /// Yield measured by pan footprint
    Area {
        shape: Shape,
        #[serde(default)]
        dimensions: AreaDimensions,
        #[serde(default)]
        unit: String,
    },
}

/// Discriminant of a [`Portion`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortionKind {
    Servings,
    Units,
    Diameter,
    Area,
}

impl Portion {
    pub fn kind(&self) -> PortionKind {
        match self {
            Portion::Servings { .. } => PortionKind::Servings,
            Portion::Units { .. } => PortionKind::Units,
            Portion::Diameter { .. } => PortionKind::Diameter,
            Portion::Area { .. } => PortionKind::Area,
        }
    }

    /// Unit key used for display (e.g. "persons", "cm")
    pub fn unit(&self) -> &str {
        match self {
            Portion::Servings { unit, .. }
            | Portion::Units { unit, .. }
            | Portion::Diameter { unit, .. }
            | Portion::Area { unit, .. } => unit,
        }
    }

    /// Whether preferences for this portion are remembered per recipe
    pub fn has_per_recipe_preferences(&self) -> bool {
        matches!(self.kind(), PortionKind::Units | PortionKind::Area)
    }
}

/// Legacy `{value, unit}` yield object found at the top level of old documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldValue {
    pub value: f64,
    #[serde(default)]
    pub unit: String,
}

/// A `portion` object as it appears in a document, tolerating unknown types
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PortionDocument {
    Servings {
        value: f64,
        #[serde(default)]
        unit: String,
    },
    Units {
        value: f64,
        #[serde(default)]
        unit: String,
    },
    Diameter {
        value: f64,
        #[serde(default)]
        unit: String,
    },
    Area {
        shape: Shape,
        #[serde(default)]
        dimensions: AreaDimensions,
        #[serde(default)]
        unit: String,
    },
    #[serde(other)]
    Unrecognized,
}

impl PortionDocument {
    /// Read a raw `portion` value; objects that do not fit any known type
    /// (missing `type`, unknown shape, bad field types) count as unrecognized
    pub fn from_value(value: serde_json::Value) -> Self {
        serde_json::from_value(value).unwrap_or_else(|e| {
            warn!("Malformed portion object: {}", e);
            PortionDocument::Unrecognized
        })
    }
}

/// Fold a document's portion description into a single [`Portion`].
///
/// The unified `portion` field wins. Without it the legacy fields are
/// consulted in the order `servings`, `units`, `diameter`. An unrecognized
/// portion type yields `None`, as does a document with no yield at all.
pub fn normalize_portion(
    portion: Option<PortionDocument>,
    servings: Option<YieldValue>,
    units: Option<YieldValue>,
    diameter: Option<YieldValue>,
) -> Option<Portion> {
    if let Some(document) = portion {
        return match document {
            PortionDocument::Servings { value, unit } => Some(Portion::Servings { value, unit }),
            PortionDocument::Units { value, unit } => Some(Portion::Units { value, unit }),
            PortionDocument::Diameter { value, unit } => Some(Portion::Diameter { value, unit }),
            PortionDocument::Area {
                shape,
                dimensions,
                unit,
            } => Some(Portion::Area {
                shape,
                dimensions,
                unit,
            }),
            PortionDocument::Unrecognized => {
                warn!("Unrecognized portion type, recipe yield will not be adjustable");
                None
            }
        };
    }

    if let Some(YieldValue { value, unit }) = servings {
        return Some(Portion::Servings { value, unit });
    }
    if let Some(YieldValue { value, unit }) = units {
        return Some(Portion::Units { value, unit });
    }
    diameter.map(|YieldValue { value, unit }| Portion::Diameter { value, unit })
}

/// Target pan dimensions chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
    pub diameter: u32,
}

/// Baseline footprint captured when a recipe is opened
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaselineArea {
    pub shape: Shape,
    pub dimensions: AreaDimensions,
}

/// The user's target yield while one recipe is open
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingPortionState {
    pub current_servings: u32,
    pub current_units: u32,
    pub current_diameter: u32,
    pub current_dimensions: Dimensions,
    /// Displayed pan shape; `None` until a baseline or preference sets it
    pub current_shape: Option<Shape>,
    original: Option<BaselineArea>,
}

impl WorkingPortionState {
    /// Create a state holding the configured default yields
    pub fn with_defaults(config: &PortionConfig) -> Self {
        Self {
            current_servings: config.default_servings,
            current_units: config.default_units,
            current_diameter: config.default_diameter,
            current_dimensions: Dimensions {
                width: config.default_width,
                height: config.default_height,
                diameter: config.default_diameter,
            },
            current_shape: None,
            original: None,
        }
    }

    /// Record the baseline footprint of an area portion.
    ///
    /// Only the first capture is kept; later calls are ignored so the
    /// multiplier denominator stays fixed for the whole session. If no
    /// shape has been chosen yet, the baseline shape becomes the displayed one.
    pub fn capture_baseline(&mut self, portion: Option<&Portion>) {
        if self.original.is_some() {
            return;
        }
        if let Some(Portion::Area {
            shape, dimensions, ..
        }) = portion
        {
            self.original = Some(BaselineArea {
                shape: *shape,
                dimensions: *dimensions,
            });
            if self.current_shape.is_none() {
                self.current_shape = Some(*shape);
            }
        }
    }

    /// The baseline footprint captured at load time, if any
    pub fn original(&self) -> Option<&BaselineArea> {
        self.original.as_ref()
    }

    /// Shape used to compute the current area
    pub fn displayed_shape(&self) -> Option<Shape> {
        self.current_shape
            .or_else(|| self.original.map(|baseline| baseline.shape))
    }
}

impl Default for WorkingPortionState {
    fn default() -> Self {
        Self::with_defaults(&PortionConfig::default())
    }
}
