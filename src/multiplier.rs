//! # Multiplier Engine
//!
//! Computes the factor applied to every ingredient quantity so that a recipe
//! authored for its baseline portion matches the user's target yield.
//!
//! - Servings and units scale linearly.
//! - A legacy diameter scales with the square of the diameter ratio.
//! - An area scales with the ratio of the displayed pan area to the baseline
//!   pan area captured when the recipe was opened.
//!
//! Degenerate baselines (zero, negative or non-finite) resolve to a neutral
//! multiplier of 1 rather than leaking `inf`/`NaN` into displayed quantities.

use log::{trace, warn};
use std::f64::consts::PI;

use crate::portion_model::{AreaDimensions, Dimensions, Portion, Shape, WorkingPortionState};

/// Area of a circle from its diameter
pub fn circle_area(diameter: f64) -> f64 {
    PI * (diameter / 2.0).powi(2)
}

/// Baseline pan area from the dimensions written in the document
fn baseline_area(shape: Shape, dimensions: &AreaDimensions) -> Option<f64> {
    if shape.is_circular() {
        dimensions.diameter.map(circle_area)
    } else {
        Some(dimensions.width? * dimensions.height?)
    }
}

/// Area of the pan currently displayed to the user
pub fn displayed_area(shape: Shape, dimensions: &Dimensions) -> f64 {
    if shape.is_circular() {
        circle_area(f64::from(dimensions.diameter))
    } else {
        f64::from(dimensions.width) * f64::from(dimensions.height)
    }
}

/// Divide, falling back to 1 when the ratio is not usable
fn guarded_ratio(current: f64, baseline: f64) -> f64 {
    if !baseline.is_finite() || baseline <= 0.0 {
        warn!("Degenerate baseline portion value {}, using multiplier 1", baseline);
        return 1.0;
    }
    let ratio = current / baseline;
    if ratio.is_finite() {
        ratio
    } else {
        1.0
    }
}

/// Compute the scale factor between a recipe's baseline portion and the
/// user's target yield.
///
/// Returns 1 when the recipe has no adjustable portion.
///
/// # Examples
///
/// ```rust
/// use recipe_portions::multiplier::compute_multiplier;
/// use recipe_portions::portion_model::{Portion, WorkingPortionState};
///
/// let portion = Portion::Servings { value: 4.0, unit: "persons".to_string() };
/// let mut state = WorkingPortionState::default();
/// state.current_servings = 8;
///
/// assert_eq!(compute_multiplier(Some(&portion), &state), 2.0);
/// ```
pub fn compute_multiplier(portion: Option<&Portion>, state: &WorkingPortionState) -> f64 {
    let Some(portion) = portion else {
        return 1.0;
    };

    let multiplier = match portion {
        Portion::Servings { value, .. } => {
            guarded_ratio(f64::from(state.current_servings), *value)
        }
        Portion::Units { value, .. } => guarded_ratio(f64::from(state.current_units), *value),
        Portion::Diameter { value, .. } => {
            guarded_ratio(f64::from(state.current_diameter), *value).powi(2)
        }
        Portion::Area {
            shape, dimensions, ..
        } => {
            let (baseline_shape, baseline_dimensions) = match state.original() {
                Some(original) => (original.shape, original.dimensions),
                None => (*shape, *dimensions),
            };
            let displayed_shape = state.displayed_shape().unwrap_or(baseline_shape);

            match baseline_area(baseline_shape, &baseline_dimensions) {
                Some(baseline) => guarded_ratio(
                    displayed_area(displayed_shape, &state.current_dimensions),
                    baseline,
                ),
                None => {
                    warn!("Area portion without usable dimensions, using multiplier 1");
                    1.0
                }
            }
        }
    };

    trace!("Computed multiplier {} for {:?}", multiplier, portion.kind());
    multiplier
}

/// Whether the recipe's yield is expressed in servings
pub fn has_servings(portion: Option<&Portion>) -> bool {
    matches!(portion, Some(Portion::Servings { .. }))
}

/// Whether the recipe's yield is expressed as an item count
pub fn has_units(portion: Option<&Portion>) -> bool {
    matches!(portion, Some(Portion::Units { .. }))
}

/// Whether the recipe's yield is a legacy pan diameter
pub fn has_diameter(portion: Option<&Portion>) -> bool {
    matches!(portion, Some(Portion::Diameter { .. }))
}

/// Whether the recipe's yield is a pan area
pub fn has_area(portion: Option<&Portion>) -> bool {
    matches!(portion, Some(Portion::Area { .. }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(shape: Shape, dimensions: AreaDimensions) -> Portion {
        Portion::Area {
            shape,
            dimensions,
            unit: "cm".to_string(),
        }
    }

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_no_portion_is_neutral() {
        let state = WorkingPortionState::default();
        assert_eq!(compute_multiplier(None, &state), 1.0);
    }

    #[test]
    fn test_units_multiplier() {
        let portion = Portion::Units {
            value: 12.0,
            unit: "cookies".to_string(),
        };
        let mut state = WorkingPortionState::default();
        state.current_units = 18;
        assert_eq!(compute_multiplier(Some(&portion), &state), 1.5);
    }

    #[test]
    fn test_legacy_diameter_squares_ratio() {
        let portion = Portion::Diameter {
            value: 20.0,
            unit: "cm".to_string(),
        };
        let mut state = WorkingPortionState::default();
        state.current_diameter = 10;
        assert_eq!(compute_multiplier(Some(&portion), &state), 0.25);
    }

    #[test]
    fn test_zero_baseline_is_guarded() {
        let portion = Portion::Servings {
            value: 0.0,
            unit: String::new(),
        };
        let state = WorkingPortionState::default();
        assert_eq!(compute_multiplier(Some(&portion), &state), 1.0);

        let portion = Portion::Diameter {
            value: -5.0,
            unit: String::new(),
        };
        assert_eq!(compute_multiplier(Some(&portion), &state), 1.0);
    }

    #[test]
    fn test_circular_area_against_captured_baseline() {
        let portion = area(
            Shape::Circular,
            AreaDimensions {
                diameter: Some(20.0),
                ..Default::default()
            },
        );
        let mut state = WorkingPortionState::default();
        state.capture_baseline(Some(&portion));
        state.current_dimensions.diameter = 20;
        assert!(approx_eq(compute_multiplier(Some(&portion), &state), 1.0));

        state.current_dimensions.diameter = 40;
        assert!(approx_eq(compute_multiplier(Some(&portion), &state), 4.0));
    }

    #[test]
    fn test_switched_shape_uses_displayed_area() {
        let portion = area(
            Shape::Rectangular,
            AreaDimensions {
                width: Some(20.0),
                height: Some(10.0),
                ..Default::default()
            },
        );
        let mut state = WorkingPortionState::default();
        state.capture_baseline(Some(&portion));
        state.current_shape = Some(Shape::Circular);
        state.current_dimensions.diameter = 10;

        let expected = circle_area(10.0) / 200.0;
        assert!(approx_eq(compute_multiplier(Some(&portion), &state), expected));
    }

    #[test]
    fn test_area_without_dimensions() {
        let portion = area(Shape::Circular, AreaDimensions::default());
        let state = WorkingPortionState::default();
        assert_eq!(compute_multiplier(Some(&portion), &state), 1.0);
    }

    #[test]
    fn test_predicates() {
        let servings = Portion::Servings {
            value: 4.0,
            unit: String::new(),
        };
        assert!(has_servings(Some(&servings)));
        assert!(!has_units(Some(&servings)));
        assert!(!has_diameter(None));
        assert!(!has_area(None));
    }
}
