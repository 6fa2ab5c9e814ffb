//! # Tabulated Functions
//!
//! A tabulated function is an ordered set of samples `(x, y)` with strictly
//! ascending abscissas, evaluated by linear interpolation between neighbouring
//! samples.
//!
//! ## Quick Start
//!
//! ```rust
//! use tabulated::{ArrayTabulatedFunction, Function, Point, TabulatedFunction};
//!
//! let mut squares = ArrayTabulatedFunction::with_values(0.0, 4.0, &[0.0, 1.0, 4.0, 9.0, 16.0])?;
//! assert_eq!(squares.value_at(2.5), 6.5);
//!
//! squares.insert_point(Point::new(2.5, 6.25))?;
//! assert_eq!(squares.value_at(2.5), 6.25);
//! # Ok::<(), tabulated::TabulatedFunctionError>(())
//! ```
//!
//! ## Backings
//!
//! - **Array**: contiguous buffer, O(1) index access, O(n) insert/delete
//! - **Linked**: circular doubly-linked ring with a last-accessed cursor
//!
//! Both backings implement [`TabulatedFunction`] and compare equal to each other
//! whenever they hold the same points. [`Tabulated`] wraps either one.

pub mod any;
pub mod array;
pub mod linked;
pub mod validation;

use std::fmt;

use crate::{
    error::TabulatedFunctionError,
    function::Function,
    point::{EPSILON, Point},
};

pub use any::Tabulated;
pub use array::{ArrayTabulatedFunction, ArrayTabulatedFunctionFactory};
pub use linked::{LinkedTabulatedFunction, LinkedTabulatedFunctionFactory};

/// Boxed iterator over point copies, in ascending x order.
pub type Points<'a> = Box<dyn Iterator<Item = Point> + 'a>;

/// Operations shared by every tabulated function backing.
///
/// Index-based accessors fail with `IndexOutOfBounds` for `index >= count()`.
/// Mutators validate completely before touching storage, so a failed call
/// leaves the function as it was.
pub trait TabulatedFunction: Function + fmt::Debug {
    /// Number of points, always at least two.
    fn count(&self) -> usize;

    /// A copy of the point at `index`.
    fn point_at(&self, index: usize) -> Result<Point, TabulatedFunctionError>;

    fn x_at(&self, index: usize) -> Result<f64, TabulatedFunctionError> {
        self.point_at(index).map(|p| p.x())
    }

    fn y_at(&self, index: usize) -> Result<f64, TabulatedFunctionError> {
        self.point_at(index).map(|p| p.y())
    }

    /// Replaces the point at `index`.
    ///
    /// # Errors
    /// `OrderViolation` unless the new abscissa stays strictly between its
    /// neighbours.
    fn set_point(&mut self, index: usize, point: Point) -> Result<(), TabulatedFunctionError>;

    /// Moves the point at `index` to a new abscissa, under the same rule as
    /// [`set_point`](TabulatedFunction::set_point).
    fn set_x(&mut self, index: usize, x: f64) -> Result<(), TabulatedFunctionError>;

    fn set_y(&mut self, index: usize, y: f64) -> Result<(), TabulatedFunctionError>;

    /// Inserts `point` at the position that keeps abscissas ascending.
    ///
    /// # Errors
    /// `DuplicateAbscissa` if a point with the same abscissa (within
    /// [`EPSILON`]) already exists.
    fn insert_point(&mut self, point: Point) -> Result<(), TabulatedFunctionError>;

    /// Removes the point at `index`.
    ///
    /// # Errors
    /// `MinimumSizeViolation` if only two points remain.
    fn delete_point(&mut self, index: usize) -> Result<(), TabulatedFunctionError>;

    /// Iterates over copies of the points. Each call starts a new traversal.
    fn points(&self) -> Points<'_>;

    /// Deep copy in the same backing family.
    fn duplicate(&self) -> Box<dyn TabulatedFunction>;

    /// Structural equality: same count and pairwise equal points, whatever
    /// the backing.
    fn equals(&self, other: &dyn TabulatedFunction) -> bool {
        self.count() == other.count() && self.points().zip(other.points()).all(|(a, b)| a == b)
    }

    /// The point count XOR-folded with every point's bit hash.
    fn structural_hash(&self) -> u64 {
        self.points()
            .fold(self.count() as u64, |hash, point| hash ^ point.hash_bits())
    }
}

impl PartialEq for dyn TabulatedFunction + '_ {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Clone for Box<dyn TabulatedFunction> {
    fn clone(&self) -> Self {
        self.duplicate()
    }
}

impl fmt::Display for dyn TabulatedFunction + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_points(f, self.points())
    }
}

/// Writes points as `{(x0; y0), (x1; y1), ...}`.
pub(crate) fn write_points(
    f: &mut fmt::Formatter<'_>,
    points: impl Iterator<Item = Point>,
) -> fmt::Result {
    write!(f, "{{")?;
    for (i, point) in points.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", point)?;
    }
    write!(f, "}}")
}

pub(crate) fn check_index(index: usize, count: usize) -> Result<(), TabulatedFunctionError> {
    if index < count {
        Ok(())
    } else {
        Err(TabulatedFunctionError::IndexOutOfBounds { index, count })
    }
}

/// Checks that `x` is finite and keeps a gap of at least [`EPSILON`] to each
/// neighbouring abscissa, the same rule construction applies.
pub(crate) fn check_order(
    index: usize,
    x: f64,
    lower: Option<f64>,
    upper: Option<f64>,
) -> Result<(), TabulatedFunctionError> {
    let above_lower = lower.is_none_or(|l| x - l >= EPSILON);
    let below_upper = upper.is_none_or(|u| u - x >= EPSILON);

    if x.is_finite() && above_lower && below_upper {
        Ok(())
    } else {
        Err(TabulatedFunctionError::OrderViolation {
            index,
            x,
            lower,
            upper,
        })
    }
}

/// Evaluates a function given by `points` (ascending, at least two) at `x`.
///
/// Scans forward and stops at the first segment whose right end reaches `x`.
pub(crate) fn interpolate(mut points: impl Iterator<Item = Point>, x: f64) -> f64 {
    let Some(mut left) = points.next() else {
        return f64::NAN;
    };
    for right in points {
        if x <= right.x() + EPSILON {
            if (x - right.x()).abs() < EPSILON {
                return right.y();
            }
            return left.y() + (right.y() - left.y()) * (x - left.x()) / (right.x() - left.x());
        }
        left = right;
    }
    f64::NAN
}

/// Points of a uniform grid over `[left, right]` carrying `values`.
///
/// The first abscissa is exactly `left` and the last exactly `right`. When
/// `right - left` overflows, interior abscissas are interpolated between the
/// bounds instead of stepped from `left`. Needs at least two values.
pub(crate) fn uniform_grid(left: f64, right: f64, values: &[f64]) -> impl Iterator<Item = Point> + '_ {
    let last = values.len().saturating_sub(1).max(1) as f64;
    let span = right - left;
    let step = span / last;
    values.iter().enumerate().map(move |(i, &y)| {
        let i = i as f64;
        let x = if i == 0.0 {
            left
        } else if i == last {
            right
        } else if span.is_finite() {
            left + i * step
        } else {
            let t = i / last;
            left * (1.0 - t) + right * t
        };
        Point::new(x, y)
    })
}

/// Implements `PartialEq`, `Hash` and `Display` for a tabulated function type
/// in terms of the structural operations of [`TabulatedFunction`].
macro_rules! structural_impls {
    ($ty:ty) => {
        impl std::hash::Hash for $ty {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                state.write_u64($crate::tabulated::TabulatedFunction::structural_hash(self));
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                $crate::tabulated::write_points(
                    f,
                    $crate::tabulated::TabulatedFunction::points(self),
                )
            }
        }
    };
    ($lhs:ty, $rhs:ty) => {
        impl PartialEq<$rhs> for $lhs {
            fn eq(&self, other: &$rhs) -> bool {
                $crate::tabulated::TabulatedFunction::equals(self, other)
            }
        }
    };
}

structural_impls!(ArrayTabulatedFunction, ArrayTabulatedFunction);
structural_impls!(ArrayTabulatedFunction, LinkedTabulatedFunction);
structural_impls!(ArrayTabulatedFunction, Tabulated);
structural_impls!(LinkedTabulatedFunction, LinkedTabulatedFunction);
structural_impls!(LinkedTabulatedFunction, ArrayTabulatedFunction);
structural_impls!(LinkedTabulatedFunction, Tabulated);
structural_impls!(Tabulated, Tabulated);
structural_impls!(Tabulated, ArrayTabulatedFunction);
structural_impls!(Tabulated, LinkedTabulatedFunction);
structural_impls!(ArrayTabulatedFunction);
structural_impls!(LinkedTabulatedFunction);
structural_impls!(Tabulated);
