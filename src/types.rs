/// Outcome of validating a value, carrying diagnostics alongside the result.
///
/// Warnings never make a value unusable; errors always do. Construction paths
/// turn an `Invalid` result into a hard error and log the warnings.
///
/// # Type Parameters
///
/// * `T` - The success payload (usually `()`)
/// * `W` - The warning type
/// * `E` - The error type
///
/// # Examples
///
/// ```rust
/// use tabulated::Point;
/// use tabulated::types::{Validate, ValidationResult};
///
/// assert!(Point::new(0.0, 1.0).validate().is_valid());
/// assert!(matches!(
///     Point::new(f64::NAN, 1.0).validate(),
///     ValidationResult::Invalid(_, _)
/// ));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult<T = (), W = String, E = String> {
    /// Valid without diagnostics
    Valid(T),
    /// Valid, but with warnings worth reporting
    Warnings(T, Vec<W>),
    /// Invalid; carries any warnings gathered and the errors found
    Invalid(Vec<W>, Vec<E>),
}

impl<T, W, E> ValidationResult<T, W, E> {
    /// Checks if the result is usable (valid, possibly with warnings).
    pub fn is_valid(&self) -> bool {
        !matches!(self, ValidationResult::Invalid(_, _))
    }

    /// Returns the warnings, whatever the outcome.
    pub fn warnings(&self) -> &[W] {
        match self {
            ValidationResult::Valid(_) => &[],
            ValidationResult::Warnings(_, warnings) | ValidationResult::Invalid(warnings, _) => {
                warnings
            }
        }
    }

    /// Returns the errors, empty unless the result is invalid.
    pub fn errors(&self) -> &[E] {
        match self {
            ValidationResult::Invalid(_, errors) => errors,
            _ => &[],
        }
    }
}

/// Types that can check their own invariants.
pub trait Validate {
    fn validate(&self) -> ValidationResult;
}
