//! # Stream Formats
//!
//! Tabulated functions can be written to and read back from two formats:
//!
//! - **Binary** ([`binary`]): a big-endian `i32` point count followed by one
//!   pair of big-endian `f64` values per point.
//! - **Text** ([`text`]): the point count on the first line, then one
//!   `x y` line per point. Any whitespace separates tokens when reading.
//!
//! Readers build the result through a [`TabulatedFunctionFactory`], so the
//! caller chooses the backing. [`TabulatedFunctions`] wraps both readers
//! around its active backing.
//!
//! ```rust
//! use tabulated::{Backing, TabulatedFunctions, io};
//!
//! let functions = TabulatedFunctions::default();
//! let original = functions.create_with_values(0.0, 1.0, &[2.0, 3.0])?;
//!
//! let mut buffer = Vec::new();
//! io::write_binary(&original, &mut buffer)?;
//! let restored = functions.read_binary_with(Backing::Linked, buffer.as_slice())?;
//!
//! assert_eq!(restored, original);
//! # Ok::<(), tabulated::FormatError>(())
//! ```
//!
//! [`TabulatedFunctionFactory`]: crate::TabulatedFunctionFactory
//! [`TabulatedFunctions`]: crate::TabulatedFunctions

pub mod binary;
pub mod text;

pub use binary::{read_binary, write_binary};
pub use text::{read_text, write_text};
