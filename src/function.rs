//! Continuous real functions of one variable.
//!
//! The tabulation machinery only needs three things from a source function:
//! its value at a point and the two ends of its domain.

use log::debug;

use crate::error::TabulatedFunctionError;

/// A real function defined on a closed interval.
pub trait Function {
    /// Value at `x`, or NaN when `x` lies outside the domain.
    fn value_at(&self, x: f64) -> f64;

    fn left_bound(&self) -> f64;

    fn right_bound(&self) -> f64;
}

impl<F: Function + ?Sized> Function for &F {
    fn value_at(&self, x: f64) -> f64 {
        (**self).value_at(x)
    }

    fn left_bound(&self) -> f64 {
        (**self).left_bound()
    }

    fn right_bound(&self) -> f64 {
        (**self).right_bound()
    }
}

impl<F: Function + ?Sized> Function for Box<F> {
    fn value_at(&self, x: f64) -> f64 {
        (**self).value_at(x)
    }

    fn left_bound(&self) -> f64 {
        (**self).left_bound()
    }

    fn right_bound(&self) -> f64 {
        (**self).right_bound()
    }
}

/// Adapts a closure into a [`Function`] on `[left, right]`.
///
/// # Examples
///
/// ```rust
/// use tabulated::{FnFunction, Function};
///
/// let sqrt = FnFunction::new(0.0, f64::INFINITY, f64::sqrt);
/// assert_eq!(sqrt.value_at(4.0), 2.0);
/// assert!(sqrt.value_at(-1.0).is_nan());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnFunction<F> {
    left: f64,
    right: f64,
    function: F,
}

impl<F> FnFunction<F>
where
    F: Fn(f64) -> f64,
{
    pub fn new(left: f64, right: f64, function: F) -> Self {
        FnFunction {
            left,
            right,
            function,
        }
    }
}

impl<F> Function for FnFunction<F>
where
    F: Fn(f64) -> f64,
{
    fn value_at(&self, x: f64) -> f64 {
        if x >= self.left && x <= self.right {
            (self.function)(x)
        } else {
            f64::NAN
        }
    }

    fn left_bound(&self) -> f64 {
        self.left
    }

    fn right_bound(&self) -> f64 {
        self.right
    }
}

/// Integrates `function` over `[left, right]` with the trapezoid rule.
///
/// The interval is cut into steps of width `step`; the final step is
/// shortened so that it ends exactly at `right`.
///
/// # Errors
/// `InvalidInput` if `left >= right`, if `step` is not a positive finite
/// number, or if the interval leaves the function's domain.
pub fn integrate(
    function: &dyn Function,
    left: f64,
    right: f64,
    step: f64,
) -> Result<f64, TabulatedFunctionError> {
    if !(left < right) {
        return Err(TabulatedFunctionError::InvalidInput(format!(
            "integration bounds must satisfy left < right (left = {}, right = {})",
            left, right
        )));
    }
    if !(step > 0.0 && step.is_finite()) {
        return Err(TabulatedFunctionError::InvalidInput(format!(
            "integration step must be positive and finite, got {}",
            step
        )));
    }
    if left < function.left_bound() || right > function.right_bound() {
        return Err(TabulatedFunctionError::InvalidInput(format!(
            "integration interval [{}, {}] leaves the domain [{}, {}]",
            left,
            right,
            function.left_bound(),
            function.right_bound()
        )));
    }

    let mut integral = 0.0;
    let mut x = left;
    let mut steps = 0usize;
    while x + step < right {
        integral += (function.value_at(x) + function.value_at(x + step)) * step / 2.0;
        x += step;
        steps += 1;
    }
    if x < right {
        integral += (function.value_at(x) + function.value_at(right)) * (right - x) / 2.0;
        steps += 1;
    }

    debug!("integrated over [{}, {}] in {} steps", left, right, steps);
    Ok(integral)
}
