//! # Factories
//!
//! Every constructor in the crate is reachable through a
//! [`TabulatedFunctionFactory`]. [`Backing`] names the available
//! implementations and maps each one to its factory, and
//! [`TabulatedFunctions`] bundles an active backing (from a
//! [`FactoryConfig`]) with construction, tabulation and stream reading.
//!
//! ```rust
//! use tabulated::{Backing, FactoryConfig, FnFunction, TabulatedFunction, TabulatedFunctions};
//!
//! let mut functions = TabulatedFunctions::new(FactoryConfig { backing: Backing::Linked });
//! let sine = FnFunction::new(0.0, std::f64::consts::PI, f64::sin);
//!
//! let tabulated = functions.tabulate(&sine, 0.0, std::f64::consts::PI, 5)?;
//! assert_eq!(tabulated.backing(), Backing::Linked);
//! assert_eq!(tabulated.count(), 5);
//!
//! functions.select("array".parse()?);
//! assert_eq!(functions.create(0.0, 1.0, 3)?.backing(), Backing::Array);
//! # Ok::<(), tabulated::TabulatedFunctionError>(())
//! ```

use std::{fmt, io, str::FromStr};

use log::debug;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::{
    error::{FormatError, TabulatedFunctionError},
    function::Function,
    io::{binary, text},
    point::Point,
    tabulated::{
        ArrayTabulatedFunctionFactory, LinkedTabulatedFunctionFactory, Tabulated,
        uniform_grid,
        validation::{validate_bounds, validate_count},
    },
    validation_utils::{_chain, _return, ensure_valid},
};

/// Builds tabulated functions of one backing.
pub trait TabulatedFunctionFactory: Send + Sync + fmt::Debug {
    /// Uniform grid of `count` zero-valued points over `[left, right]`.
    fn create(&self, left: f64, right: f64, count: usize) -> Result<Tabulated, TabulatedFunctionError>;

    /// Uniform grid over `[left, right]` carrying `values`.
    fn create_with_values(
        &self,
        left: f64,
        right: f64,
        values: &[f64],
    ) -> Result<Tabulated, TabulatedFunctionError>;

    /// Copies strictly ascending `points`.
    fn create_from_points(&self, points: &[Point]) -> Result<Tabulated, TabulatedFunctionError>;
}

static ARRAY_FACTORY: ArrayTabulatedFunctionFactory = ArrayTabulatedFunctionFactory;
static LINKED_FACTORY: LinkedTabulatedFunctionFactory = LinkedTabulatedFunctionFactory;

/// The storage strategy behind a tabulated function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Backing {
    /// Contiguous buffer.
    #[default]
    Array,
    /// Circular linked ring with a cursor.
    Linked,
}

impl Backing {
    pub const ALL: [Backing; 2] = [Backing::Array, Backing::Linked];

    /// The factory registered for this backing.
    pub fn factory(self) -> &'static dyn TabulatedFunctionFactory {
        match self {
            Backing::Array => &ARRAY_FACTORY,
            Backing::Linked => &LINKED_FACTORY,
        }
    }
}

impl fmt::Display for Backing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backing::Array => write!(f, "array"),
            Backing::Linked => write!(f, "linked"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown backing '{0}' (expected one of: array, linked, linked-list)")]
pub struct BackingParseError(pub String);

impl From<BackingParseError> for TabulatedFunctionError {
    fn from(err: BackingParseError) -> Self {
        TabulatedFunctionError::InvalidInput(err.to_string())
    }
}

impl FromStr for Backing {
    type Err = BackingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "array" => Ok(Backing::Array),
            "linked" | "linked-list" => Ok(Backing::Linked),
            _ => Err(BackingParseError(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Backing {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Backing::from_str(&s).map_err(|err| {
            serde::de::Error::invalid_value(
                serde::de::Unexpected::Str(err.0.as_str()),
                &"a valid backing (array, linked, linked-list)",
            )
        })
    }
}

impl Serialize for Backing {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Construction settings for [`TabulatedFunctions`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FactoryConfig {
    /// Backing used by the non-`_by_type` operations.
    pub backing: Backing,
}

/// Construction, tabulation and stream reading through an active backing.
#[derive(Debug, Clone, Default)]
pub struct TabulatedFunctions {
    config: FactoryConfig,
}

impl TabulatedFunctions {
    pub fn new(config: FactoryConfig) -> Self {
        TabulatedFunctions { config }
    }

    /// Makes `backing` the active backing.
    pub fn select(&mut self, backing: Backing) {
        debug!("selected {} backing (was {})", backing, self.config.backing);
        self.config.backing = backing;
    }

    pub fn backing(&self) -> Backing {
        self.config.backing
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    pub fn factory(&self) -> &'static dyn TabulatedFunctionFactory {
        self.config.backing.factory()
    }

    pub fn create(&self, left: f64, right: f64, count: usize) -> Result<Tabulated, TabulatedFunctionError> {
        self.factory().create(left, right, count)
    }

    pub fn create_with_values(
        &self,
        left: f64,
        right: f64,
        values: &[f64],
    ) -> Result<Tabulated, TabulatedFunctionError> {
        self.factory().create_with_values(left, right, values)
    }

    pub fn create_from_points(&self, points: &[Point]) -> Result<Tabulated, TabulatedFunctionError> {
        self.factory().create_from_points(points)
    }

    pub fn create_by_type(
        &self,
        backing: Backing,
        left: f64,
        right: f64,
        count: usize,
    ) -> Result<Tabulated, TabulatedFunctionError> {
        backing.factory().create(left, right, count)
    }

    pub fn create_with_values_by_type(
        &self,
        backing: Backing,
        left: f64,
        right: f64,
        values: &[f64],
    ) -> Result<Tabulated, TabulatedFunctionError> {
        backing.factory().create_with_values(left, right, values)
    }

    pub fn create_from_points_by_type(
        &self,
        backing: Backing,
        points: &[Point],
    ) -> Result<Tabulated, TabulatedFunctionError> {
        backing.factory().create_from_points(points)
    }

    /// Like [`create_by_type`](Self::create_by_type), with the backing given
    /// by name.
    ///
    /// # Errors
    /// `InvalidInput` if `name` is not a known backing.
    pub fn create_by_name(
        &self,
        name: &str,
        left: f64,
        right: f64,
        count: usize,
    ) -> Result<Tabulated, TabulatedFunctionError> {
        self.create_by_type(name.parse()?, left, right, count)
    }

    pub fn create_with_values_by_name(
        &self,
        name: &str,
        left: f64,
        right: f64,
        values: &[f64],
    ) -> Result<Tabulated, TabulatedFunctionError> {
        self.create_with_values_by_type(name.parse()?, left, right, values)
    }

    pub fn create_from_points_by_name(
        &self,
        name: &str,
        points: &[Point],
    ) -> Result<Tabulated, TabulatedFunctionError> {
        self.create_from_points_by_type(name.parse()?, points)
    }

    /// Samples `function` at `count` evenly spaced abscissas over
    /// `[left, right]`, the last one exactly `right`, into the active backing.
    ///
    /// # Errors
    /// `InvalidInput` if `left >= right`, `count < 2`, or `[left, right]` is
    /// not inside the domain of `function`.
    pub fn tabulate(
        &self,
        function: &dyn Function,
        left: f64,
        right: f64,
        count: usize,
    ) -> Result<Tabulated, TabulatedFunctionError> {
        self.tabulate_with(self.config.backing, function, left, right, count)
    }

    /// [`tabulate`](Self::tabulate) into an explicit backing.
    pub fn tabulate_with(
        &self,
        backing: Backing,
        function: &dyn Function,
        left: f64,
        right: f64,
        count: usize,
    ) -> Result<Tabulated, TabulatedFunctionError> {
        let mut warnings = Vec::new();
        let mut errors = Vec::new();

        _chain(validate_bounds(left, right), &mut warnings, &mut errors);
        _chain(validate_count(count), &mut warnings, &mut errors);
        if left < function.left_bound() || right > function.right_bound() {
            errors.push(format!(
                "Tabulation interval [{}, {}] leaves the domain [{}, {}].",
                left,
                right,
                function.left_bound(),
                function.right_bound()
            ));
        }
        ensure_valid(_return(warnings, errors))?;

        let samples = vec![0.0; count];
        let points: Vec<Point> = uniform_grid(left, right, &samples)
            .map(|p| Point::new(p.x(), function.value_at(p.x())))
            .collect();

        debug!(
            "tabulated [{}, {}] into {} points ({} backing)",
            left, right, count, backing
        );
        backing.factory().create_from_points(&points)
    }

    /// Reads the binary stream format into the active backing.
    pub fn read_binary(&self, reader: impl io::Read) -> Result<Tabulated, FormatError> {
        binary::read_binary(self.factory(), reader)
    }

    pub fn read_binary_with(
        &self,
        backing: Backing,
        reader: impl io::Read,
    ) -> Result<Tabulated, FormatError> {
        binary::read_binary(backing.factory(), reader)
    }

    /// Reads the text stream format into the active backing.
    pub fn read_text(&self, reader: impl io::Read) -> Result<Tabulated, FormatError> {
        text::read_text(self.factory(), reader)
    }

    pub fn read_text_with(
        &self,
        backing: Backing,
        reader: impl io::Read,
    ) -> Result<Tabulated, FormatError> {
        text::read_text(backing.factory(), reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{function::FnFunction, tabulated::TabulatedFunction};

    mod backing_tests {
        use super::*;

        #[test]
        fn test_parse() {
            assert_eq!("array".parse::<Backing>(), Ok(Backing::Array));
            assert_eq!("Linked".parse::<Backing>(), Ok(Backing::Linked));
            assert_eq!("LINKED-LIST".parse::<Backing>(), Ok(Backing::Linked));
            assert_eq!(
                "tree".parse::<Backing>(),
                Err(BackingParseError("tree".to_string()))
            );
        }

        #[test]
        fn test_display_round_trips() {
            for backing in Backing::ALL {
                assert_eq!(backing.to_string().parse::<Backing>(), Ok(backing));
            }
        }

        #[test]
        fn test_factory_builds_its_backing() {
            for backing in Backing::ALL {
                let function = backing.factory().create(0.0, 1.0, 3).unwrap();
                assert_eq!(function.backing(), backing);
            }
        }

        #[test]
        fn test_parse_error_is_invalid_input() {
            let err: TabulatedFunctionError = BackingParseError("x".to_string()).into();
            assert!(matches!(err, TabulatedFunctionError::InvalidInput(_)));
        }
    }

    mod selection_tests {
        use super::*;

        #[test]
        fn test_default_is_array() {
            let functions = TabulatedFunctions::default();
            assert_eq!(functions.backing(), Backing::Array);
            assert_eq!(functions.create(0.0, 1.0, 2).unwrap().backing(), Backing::Array);
        }

        #[test]
        fn test_select() {
            let mut functions = TabulatedFunctions::default();
            functions.select(Backing::Linked);

            assert_eq!(functions.config().backing, Backing::Linked);
            let function = functions.create_with_values(0.0, 1.0, &[1.0, 2.0]).unwrap();
            assert_eq!(function.backing(), Backing::Linked);
        }

        #[test]
        fn test_by_type_ignores_active_backing() {
            let functions = TabulatedFunctions::new(FactoryConfig {
                backing: Backing::Linked,
            });
            let points = [Point::new(0.0, 0.0), Point::new(1.0, 1.0)];

            let function = functions
                .create_from_points_by_type(Backing::Array, &points)
                .unwrap();
            assert_eq!(function.backing(), Backing::Array);
        }

        #[test]
        fn test_by_name() {
            let functions = TabulatedFunctions::default();

            let function = functions.create_by_name("linked-list", 0.0, 1.0, 4).unwrap();
            assert_eq!(function.backing(), Backing::Linked);

            assert!(matches!(
                functions.create_with_values_by_name("heap", 0.0, 1.0, &[0.0, 1.0]),
                Err(TabulatedFunctionError::InvalidInput(_))
            ));
        }
    }

    mod tabulate_tests {
        use super::*;

        #[test]
        fn test_samples_source() {
            let square = FnFunction::new(-2.0, 2.0, |x| x * x);
            let function = TabulatedFunctions::default()
                .tabulate(&square, -1.0, 1.0, 3)
                .unwrap();

            assert_eq!(
                function.points().collect::<Vec<_>>(),
                vec![Point::new(-1.0, 1.0), Point::new(0.0, 0.0), Point::new(1.0, 1.0)]
            );
        }

        #[test]
        fn test_rejects_interval_outside_domain() {
            let square = FnFunction::new(0.0, 1.0, |x| x * x);
            let functions = TabulatedFunctions::default();

            let err = functions.tabulate(&square, 0.0, 2.0, 3).unwrap_err();
            assert!(err.to_string().contains("leaves the domain"));
        }

        #[test]
        fn test_rejects_bad_grid() {
            let square = FnFunction::new(0.0, 1.0, |x| x * x);
            let functions = TabulatedFunctions::default();

            assert!(functions.tabulate(&square, 1.0, 0.0, 3).is_err());
            assert!(functions.tabulate_with(Backing::Linked, &square, 0.0, 1.0, 1).is_err());
        }
    }

    mod config_tests {
        use super::*;

        #[test]
        fn test_config_serde() {
            let config = FactoryConfig {
                backing: Backing::Linked,
            };
            let json = serde_json::to_string(&config).unwrap();
            assert_eq!(json, r#"{"backing":"linked"}"#);

            let parsed: FactoryConfig = serde_json::from_str(r#"{"backing":"Linked-List"}"#).unwrap();
            assert_eq!(parsed, config);

            let empty: FactoryConfig = serde_json::from_str("{}").unwrap();
            assert_eq!(empty, FactoryConfig::default());

            assert!(serde_json::from_str::<FactoryConfig>(r#"{"backing":"tree"}"#).is_err());
        }
    }
}
