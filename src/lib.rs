//! # tabulated
//!
//! Real functions of one variable given by a table of samples, evaluated by
//! linear interpolation. Two interchangeable backings store the samples:
//! a contiguous array and a circular linked ring with an access cursor.
//!
//! - [`TabulatedFunction`]: the shared contract of both backings
//! - [`TabulatedFunctions`]: construction by backing or by name, tabulation of
//!   arbitrary [`Function`]s, and stream reading
//! - [`io`]: the binary and text stream formats

pub mod error;
pub mod factory;
pub mod function;
pub mod io;
pub mod point;
pub mod tabulated;
pub mod types;

mod validation_utils;

#[cfg(test)]
mod test_utils;

pub use crate::error::{FormatError, TabulatedFunctionError};
pub use crate::factory::{
    Backing, BackingParseError, FactoryConfig, TabulatedFunctionFactory, TabulatedFunctions,
};
pub use crate::function::{FnFunction, Function, integrate};
pub use crate::point::{EPSILON, Point};
pub use crate::tabulated::{
    ArrayTabulatedFunction, ArrayTabulatedFunctionFactory, LinkedTabulatedFunction,
    LinkedTabulatedFunctionFactory, Tabulated, TabulatedFunction,
};
