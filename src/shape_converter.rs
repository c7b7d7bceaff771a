//! # Dimension/Shape Converter
//!
//! Converts displayed pan dimensions between circular and rectangular forms
//! while keeping the area roughly the same, and steps rectangular pans without
//! distorting their aspect ratio.
//!
//! Conversions only touch the *displayed* dimensions. The baseline captured
//! in [`WorkingPortionState`](crate::portion_model::WorkingPortionState) is
//! never rewritten, so the multiplier keeps its original denominator.

use log::debug;
use std::f64::consts::PI;

use crate::multiplier::circle_area;
use crate::portion_config::StepBounds;
use crate::portion_model::{Dimensions, Shape};

fn round_to_u32(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round() as u32
    } else {
        0
    }
}

/// Diameter of the circle whose area matches a `width × height` rectangle
pub fn rectangle_to_diameter(width: u32, height: u32) -> u32 {
    let area = f64::from(width) * f64::from(height);
    round_to_u32(2.0 * (area / PI).sqrt())
}

/// Side of the square whose area matches a circle of the given diameter
pub fn diameter_to_side(diameter: u32) -> u32 {
    round_to_u32(circle_area(f64::from(diameter)).sqrt())
}

/// Toggle displayed dimensions to the other shape family.
///
/// Circular becomes rectangular (as a square approximation); rectangular and
/// square become circular. Only the field relevant to the target shape is
/// recomputed, the others are carried over unchanged.
///
/// # Examples
///
/// ```rust
/// use recipe_portions::portion_model::{Dimensions, Shape};
/// use recipe_portions::shape_converter::convert;
///
/// let square = Dimensions { width: 20, height: 20, diameter: 15 };
/// let (shape, round) = convert(Shape::Rectangular, &square);
/// assert_eq!(shape, Shape::Circular);
/// assert_eq!(round.diameter, 23);
/// ```
pub fn convert(from: Shape, dimensions: &Dimensions) -> (Shape, Dimensions) {
    match from {
        Shape::Circular => (Shape::Rectangular, convert_to(from, dimensions, Shape::Rectangular)),
        Shape::Rectangular | Shape::Square => {
            (Shape::Circular, convert_to(from, dimensions, Shape::Circular))
        }
    }
}

/// Convert displayed dimensions to a specific shape
pub fn convert_to(from: Shape, dimensions: &Dimensions, to: Shape) -> Dimensions {
    let mut converted = *dimensions;
    match (from.is_circular(), to.is_circular()) {
        (false, true) => {
            converted.diameter = rectangle_to_diameter(dimensions.width, dimensions.height);
        }
        (true, false) => {
            let side = diameter_to_side(dimensions.diameter);
            converted.width = side;
            converted.height = side;
        }
        _ => {}
    }
    debug!(
        "Converted dimensions {:?} ({:?}) to {:?} ({:?})",
        dimensions, from, converted, to
    );
    converted
}

/// Step a rectangular pan's width by `delta`, keeping the aspect ratio.
///
/// The aspect ratio is taken from the dimensions before the step; the new
/// height is `round(width / aspect)`. Both sides are clamped to `bounds`.
pub fn step_rectangle(dimensions: &Dimensions, delta: i32, bounds: StepBounds) -> Dimensions {
    let aspect = if dimensions.height == 0 || dimensions.width == 0 {
        1.0
    } else {
        f64::from(dimensions.width) / f64::from(dimensions.height)
    };

    let width = bounds.clamp(dimensions.width.saturating_add_signed(delta));
    let height = bounds.clamp(round_to_u32(f64::from(width) / aspect));

    Dimensions {
        width,
        height,
        diameter: dimensions.diameter,
    }
}
