use itertools::Itertools;
use log::warn;

use crate::{error::TabulatedFunctionError, types::ValidationResult};

pub fn _chain<T>(
    result: ValidationResult<T>,
    warnings: &mut Vec<String>,
    errors: &mut Vec<String>,
) {
    match result {
        ValidationResult::Valid(_) => {}
        ValidationResult::Warnings(_, warns) => {
            warnings.extend(warns);
        }
        ValidationResult::Invalid(warns, errs) => {
            warnings.extend(warns);
            errors.extend(errs);
        }
    }
}

pub fn _return(warnings: Vec<String>, errors: Vec<String>) -> ValidationResult {
    if !errors.is_empty() {
        ValidationResult::Invalid(warnings, errors)
    } else if !warnings.is_empty() {
        ValidationResult::Warnings((), warnings)
    } else {
        ValidationResult::Valid(())
    }
}

/// Logs the warnings of `result` and converts its errors into
/// `TabulatedFunctionError::InvalidInput`.
pub fn ensure_valid(result: ValidationResult) -> Result<(), TabulatedFunctionError> {
    match result {
        ValidationResult::Valid(_) => Ok(()),
        ValidationResult::Warnings(_, warnings) => {
            warnings.into_iter().for_each(|w| warn!("{}", w));
            Ok(())
        }
        ValidationResult::Invalid(warnings, errors) => {
            warnings.into_iter().for_each(|w| warn!("{}", w));
            Err(TabulatedFunctionError::InvalidInput(errors.join("; ")))
        }
    }
}

/// Checks that every value is greater than its predecessor by at least
/// `tolerance`.
pub fn validate_strictly_ascending(values: &[f64], tolerance: f64) -> ValidationResult {
    let warnings = Vec::new();
    let mut errors = Vec::new();

    for (i, (prev, next)) in values.iter().tuple_windows().enumerate() {
        if !(next - prev >= tolerance) {
            errors.push(format!(
                "values are not in strictly ascending order: {} >= {} at index {}",
                prev,
                next,
                i + 1
            ));
        }
    }

    _return(warnings, errors)
}

pub fn validate_finite(values: &[f64]) -> ValidationResult {
    let warnings = Vec::new();
    let mut errors = Vec::new();

    for (i, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            errors.push(format!(
                "value at index {} is not a valid number: {}",
                i, value
            ));
        }
    }

    _return(warnings, errors)
}
