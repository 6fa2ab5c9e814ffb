//! Sample points of tabulated functions.

use std::{
    fmt,
    hash::{Hash, Hasher},
};

use serde::{Deserialize, Serialize};

use crate::{
    types::{Validate, ValidationResult},
    validation_utils::_return,
};

/// Tolerance used both for point equality and for the minimum gap between
/// neighbouring abscissas.
pub const EPSILON: f64 = 1e-10;

/// A single `(x, y)` sample.
///
/// Points are `Copy`: every accessor of a tabulated function hands out a copy,
/// so nothing held by a caller aliases the function's storage.
///
/// Equality is tolerance based (`|dx| < EPSILON && |dy| < EPSILON`), while the
/// hash is taken from the raw bit patterns of both coordinates.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// The point `(0, 0)`.
    pub fn origin() -> Self {
        Point { x: 0.0, y: 0.0 }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    /// XOR of the bit patterns of both coordinates.
    pub fn hash_bits(&self) -> u64 {
        self.x.to_bits() ^ self.y.to_bits()
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < EPSILON && (self.y - other.y).abs() < EPSILON
    }
}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_bits());
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

impl From<Point> for (f64, f64) {
    fn from(point: Point) -> Self {
        (point.x, point.y)
    }
}

impl fmt::Display for Point {
    /// Formats as `(x; y)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}; {})", self.x, self.y)
    }
}

impl Validate for Point {
    /// A non-finite abscissa is an error; a non-finite ordinate is only a
    /// warning.
    fn validate(&self) -> ValidationResult {
        let mut warnings = Vec::new();
        let mut errors = Vec::new();

        if !self.x.is_finite() {
            errors.push(format!("Point {} has a non-finite abscissa.", self));
        }
        if !self.y.is_finite() {
            warnings.push(format!("Point {} has a non-finite ordinate.", self));
        }

        _return(warnings, errors)
    }
}
