//! Error types for tabulated function construction, mutation and I/O.

use std::fmt;

use thiserror::Error;

/// Failures raised by tabulated functions and the factory layer.
///
/// Every operation that returns this error leaves the function it was called
/// on unmodified.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TabulatedFunctionError {
    /// Malformed construction arguments or an unknown backing name.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A point index outside `[0, count)`.
    #[error("Point index {index} is out of bounds for a function with {count} points")]
    IndexOutOfBounds { index: usize, count: usize },

    /// A new abscissa would break the strict ascending order of points.
    #[error("Abscissa {x} at index {index} must lie in {}", Interval(.lower, .upper))]
    OrderViolation {
        index: usize,
        x: f64,
        lower: Option<f64>,
        upper: Option<f64>,
    },

    /// A point with the same abscissa (within tolerance) already exists.
    #[error("A point with abscissa {x} already exists")]
    DuplicateAbscissa { x: f64 },

    /// Deleting would leave fewer than two points.
    #[error("Cannot delete a point from a function with {count} points")]
    MinimumSizeViolation { count: usize },
}

impl TabulatedFunctionError {
    /// True for errors that reject an abscissa because of point ordering.
    pub fn is_order_violation(&self) -> bool {
        matches!(
            self,
            TabulatedFunctionError::OrderViolation { .. }
                | TabulatedFunctionError::DuplicateAbscissa { .. }
        )
    }
}

struct Interval<'a>(&'a Option<f64>, &'a Option<f64>);

impl fmt::Display for Interval<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self.0 {
            Some(lower) => write!(f, "({}, ", lower)?,
            None => write!(f, "(-inf, ")?,
        }
        match *self.1 {
            Some(upper) => write!(f, "{})", upper),
            None => write!(f, "+inf)"),
        }
    }
}

/// Failures while reading or writing the binary and text formats.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The underlying stream failed or ended early.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream contents do not follow the format.
    #[error("Malformed input: {0}")]
    Malformed(String),

    /// The decoded points do not form a valid tabulated function.
    #[error(transparent)]
    Function(#[from] TabulatedFunctionError),
}
