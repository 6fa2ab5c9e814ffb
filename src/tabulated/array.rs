//! Array-backed tabulated functions.

use log::debug;

use super::{
    Points, Tabulated, TabulatedFunction, check_index, check_order, interpolate, uniform_grid,
    validation,
};
use crate::{
    error::TabulatedFunctionError,
    factory::TabulatedFunctionFactory,
    function::Function,
    point::{EPSILON, Point},
    types::{Validate, ValidationResult},
    validation_utils::ensure_valid,
};

/// Tabulated function stored in a contiguous, ordered buffer.
///
/// Index access is O(1). Insertion and deletion shift the tail of the buffer
/// and are O(n). When an insertion finds the buffer full, its capacity is
/// doubled.
///
/// # Examples
///
/// ```rust
/// use tabulated::{ArrayTabulatedFunction, Function, TabulatedFunction};
///
/// let function = ArrayTabulatedFunction::with_values(0.0, 10.0, &[0.0, 1.0, 4.0, 9.0, 16.0])?;
/// assert_eq!(function.count(), 5);
/// assert_eq!(function.x_at(1)?, 2.5);
/// assert!(function.value_at(11.0).is_nan());
/// # Ok::<(), tabulated::TabulatedFunctionError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ArrayTabulatedFunction {
    points: Vec<Point>,
}

impl ArrayTabulatedFunction {
    /// Uniform grid of `count` points over `[left, right]`, all with y = 0.
    pub fn new(left: f64, right: f64, count: usize) -> Result<Self, TabulatedFunctionError> {
        ensure_valid(validation::validate_grid(left, right, count))?;
        Ok(Self::from_valid(uniform_grid(left, right, &vec![0.0; count])))
    }

    /// Uniform grid over `[left, right]` with one point per value.
    pub fn with_values(left: f64, right: f64, values: &[f64]) -> Result<Self, TabulatedFunctionError> {
        ensure_valid(validation::validate_grid_values(left, right, values))?;
        Ok(Self::from_valid(uniform_grid(left, right, values)))
    }

    /// Copies `points`, which must already be strictly ascending in x.
    pub fn from_points(points: &[Point]) -> Result<Self, TabulatedFunctionError> {
        ensure_valid(validation::validate_points(points))?;
        Ok(Self::from_valid(points.iter().copied()))
    }

    fn from_valid(points: impl Iterator<Item = Point>) -> Self {
        ArrayTabulatedFunction {
            points: points.collect(),
        }
    }

    /// Iterates over copies of the points.
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, Point>> {
        self.points.iter().copied()
    }

    /// Number of points the buffer can hold before it has to grow.
    pub fn capacity(&self) -> usize {
        self.points.capacity()
    }

    fn neighbours(&self, index: usize) -> (Option<f64>, Option<f64>) {
        let lower = index.checked_sub(1).map(|i| self.points[i].x());
        let upper = self.points.get(index + 1).map(Point::x);
        (lower, upper)
    }

    fn grow_if_full(&mut self) {
        let len = self.points.len();
        if len == self.points.capacity() {
            self.points.reserve_exact(len.max(1));
            debug!("array buffer grown from {} to {}", len, self.points.capacity());
        }
    }
}

impl Function for ArrayTabulatedFunction {
    fn value_at(&self, x: f64) -> f64 {
        if x >= self.left_bound() && x <= self.right_bound() {
            interpolate(self.iter(), x)
        } else {
            f64::NAN
        }
    }

    fn left_bound(&self) -> f64 {
        self.points[0].x()
    }

    fn right_bound(&self) -> f64 {
        self.points[self.points.len() - 1].x()
    }
}

impl TabulatedFunction for ArrayTabulatedFunction {
    fn count(&self) -> usize {
        self.points.len()
    }

    fn point_at(&self, index: usize) -> Result<Point, TabulatedFunctionError> {
        check_index(index, self.count())?;
        Ok(self.points[index])
    }

    fn set_point(&mut self, index: usize, point: Point) -> Result<(), TabulatedFunctionError> {
        check_index(index, self.count())?;
        let (lower, upper) = self.neighbours(index);
        check_order(index, point.x(), lower, upper)?;
        self.points[index] = point;
        Ok(())
    }

    fn set_x(&mut self, index: usize, x: f64) -> Result<(), TabulatedFunctionError> {
        check_index(index, self.count())?;
        let (lower, upper) = self.neighbours(index);
        check_order(index, x, lower, upper)?;
        self.points[index].set_x(x);
        Ok(())
    }

    fn set_y(&mut self, index: usize, y: f64) -> Result<(), TabulatedFunctionError> {
        check_index(index, self.count())?;
        self.points[index].set_y(y);
        Ok(())
    }

    fn insert_point(&mut self, point: Point) -> Result<(), TabulatedFunctionError> {
        let x = point.x();
        if !x.is_finite() {
            return Err(TabulatedFunctionError::InvalidInput(format!(
                "cannot insert a point with a non-finite abscissa: {}",
                x
            )));
        }

        let mut slot = self.points.len();
        for (i, existing) in self.points.iter().enumerate() {
            if (existing.x() - x).abs() < EPSILON {
                return Err(TabulatedFunctionError::DuplicateAbscissa { x });
            }
            if x < existing.x() {
                slot = i;
                break;
            }
        }

        self.grow_if_full();
        self.points.insert(slot, point);
        debug!("inserted {} at index {} of {}", point, slot, self.points.len());
        Ok(())
    }

    fn delete_point(&mut self, index: usize) -> Result<(), TabulatedFunctionError> {
        let count = self.count();
        check_index(index, count)?;
        if count <= validation::MIN_POINTS {
            return Err(TabulatedFunctionError::MinimumSizeViolation { count });
        }

        let removed = self.points.remove(index);
        debug!("deleted {} from index {} of {}", removed, index, count);
        Ok(())
    }

    fn points(&self) -> Points<'_> {
        Box::new(self.iter())
    }

    fn duplicate(&self) -> Box<dyn TabulatedFunction> {
        Box::new(self.clone())
    }
}

impl Validate for ArrayTabulatedFunction {
    fn validate(&self) -> ValidationResult {
        validation::validate_function(self)
    }
}

impl<'a> IntoIterator for &'a ArrayTabulatedFunction {
    type Item = Point;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Point>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Builds [`ArrayTabulatedFunction`]s behind [`Tabulated`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayTabulatedFunctionFactory;

impl TabulatedFunctionFactory for ArrayTabulatedFunctionFactory {
    fn create(&self, left: f64, right: f64, count: usize) -> Result<Tabulated, TabulatedFunctionError> {
        ArrayTabulatedFunction::new(left, right, count).map(Tabulated::Array)
    }

    fn create_with_values(
        &self,
        left: f64,
        right: f64,
        values: &[f64],
    ) -> Result<Tabulated, TabulatedFunctionError> {
        ArrayTabulatedFunction::with_values(left, right, values).map(Tabulated::Array)
    }

    fn create_from_points(&self, points: &[Point]) -> Result<Tabulated, TabulatedFunctionError> {
        ArrayTabulatedFunction::from_points(points).map(Tabulated::Array)
    }
}
