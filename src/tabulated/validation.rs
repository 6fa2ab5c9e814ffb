use itertools::Itertools;

use super::TabulatedFunction;
use crate::{
    point::{EPSILON, Point},
    types::{Validate, ValidationResult},
    validation_utils::{_chain, _return, validate_finite, validate_strictly_ascending},
};

/// Smallest number of points a tabulated function may hold.
pub const MIN_POINTS: usize = 2;

pub fn validate_bounds(left: f64, right: f64) -> ValidationResult {
    let mut warnings = Vec::new();
    let mut errors = Vec::new();

    _chain(validate_finite(&[left, right]), &mut warnings, &mut errors);

    if !(left < right) {
        errors.push(format!(
            "Left bound {} must be strictly less than right bound {}.",
            left, right
        ));
    }

    _return(warnings, errors)
}

pub fn validate_count(count: usize) -> ValidationResult {
    let warnings = Vec::new();
    let mut errors = Vec::new();

    if count < MIN_POINTS {
        errors.push(format!(
            "A tabulated function needs at least {} points, got {}.",
            MIN_POINTS, count
        ));
    }

    _return(warnings, errors)
}

/// Arguments of the uniform-grid constructors.
pub fn validate_grid(left: f64, right: f64, count: usize) -> ValidationResult {
    let mut warnings = Vec::new();
    let mut errors = Vec::new();

    _chain(validate_bounds(left, right), &mut warnings, &mut errors);
    _chain(validate_count(count), &mut warnings, &mut errors);

    let intervals = (count.max(MIN_POINTS) - 1) as f64;
    if errors.is_empty() && right / intervals - left / intervals < EPSILON {
        errors.push(format!(
            "Grid of {} points over [{}, {}] is finer than the abscissa tolerance {}.",
            count, left, right, EPSILON
        ));
    }

    _return(warnings, errors)
}

/// Arguments of the grid constructors that take values. Non-finite values are
/// warnings, as they are for explicit points.
pub fn validate_grid_values(left: f64, right: f64, values: &[f64]) -> ValidationResult {
    let mut warnings = Vec::new();
    let mut errors = Vec::new();

    _chain(validate_grid(left, right, values.len()), &mut warnings, &mut errors);
    for (i, value) in values.iter().enumerate() {
        if !value.is_finite() {
            warnings.push(format!("Value {} at index {} is not finite.", value, i));
        }
    }

    _return(warnings, errors)
}

/// Points for the explicit-point constructors: enough of them, finite
/// abscissas, strictly ascending with a gap of at least [`EPSILON`].
pub fn validate_points(points: &[Point]) -> ValidationResult {
    let mut warnings = Vec::new();
    let mut errors = Vec::new();

    let w = &mut warnings;
    let e = &mut errors;

    _chain(validate_count(points.len()), w, e);
    for point in points {
        _chain(point.validate(), w, e);
    }
    let xs = points.iter().map(Point::x).collect_vec();
    _chain(validate_strictly_ascending(&xs, EPSILON), w, e);

    _return(warnings, errors)
}

/// Re-checks the invariants of an existing function.
pub fn validate_function(function: &dyn TabulatedFunction) -> ValidationResult {
    let points = function.points().collect_vec();
    let result = validate_points(&points);

    if points.len() != function.count() {
        let warnings = result.warnings().to_vec();
        let mut errors = result.errors().to_vec();
        errors.push(format!(
            "Function reports {} points but yields {}.",
            function.count(),
            points.len()
        ));
        return _return(warnings, errors);
    }

    result
}
