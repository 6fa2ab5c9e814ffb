use super::{ArrayTabulatedFunction, LinkedTabulatedFunction, Points, TabulatedFunction};
use crate::{
    error::TabulatedFunctionError,
    factory::Backing,
    function::Function,
    point::Point,
    types::{Validate, ValidationResult},
};

/// A tabulated function in one of the supported backings.
///
/// This is what the factories hand out. It forwards every operation to the
/// wrapped function, and compares equal to either concrete backing when the
/// points match.
#[derive(Debug, Clone)]
pub enum Tabulated {
    Array(ArrayTabulatedFunction),
    Linked(LinkedTabulatedFunction),
}

impl Tabulated {
    pub fn backing(&self) -> Backing {
        match self {
            Tabulated::Array(_) => Backing::Array,
            Tabulated::Linked(_) => Backing::Linked,
        }
    }

    pub fn as_dyn(&self) -> &dyn TabulatedFunction {
        match self {
            Tabulated::Array(function) => function,
            Tabulated::Linked(function) => function,
        }
    }

    pub fn as_dyn_mut(&mut self) -> &mut dyn TabulatedFunction {
        match self {
            Tabulated::Array(function) => function,
            Tabulated::Linked(function) => function,
        }
    }

    /// Boxes the wrapped function.
    pub fn into_boxed(self) -> Box<dyn TabulatedFunction> {
        match self {
            Tabulated::Array(function) => Box::new(function),
            Tabulated::Linked(function) => Box::new(function),
        }
    }
}

impl From<ArrayTabulatedFunction> for Tabulated {
    fn from(function: ArrayTabulatedFunction) -> Self {
        Tabulated::Array(function)
    }
}

impl From<LinkedTabulatedFunction> for Tabulated {
    fn from(function: LinkedTabulatedFunction) -> Self {
        Tabulated::Linked(function)
    }
}

impl Function for Tabulated {
    fn value_at(&self, x: f64) -> f64 {
        self.as_dyn().value_at(x)
    }

    fn left_bound(&self) -> f64 {
        self.as_dyn().left_bound()
    }

    fn right_bound(&self) -> f64 {
        self.as_dyn().right_bound()
    }
}

impl TabulatedFunction for Tabulated {
    fn count(&self) -> usize {
        self.as_dyn().count()
    }

    fn point_at(&self, index: usize) -> Result<Point, TabulatedFunctionError> {
        self.as_dyn().point_at(index)
    }

    fn set_point(&mut self, index: usize, point: Point) -> Result<(), TabulatedFunctionError> {
        self.as_dyn_mut().set_point(index, point)
    }

    fn set_x(&mut self, index: usize, x: f64) -> Result<(), TabulatedFunctionError> {
        self.as_dyn_mut().set_x(index, x)
    }

    fn set_y(&mut self, index: usize, y: f64) -> Result<(), TabulatedFunctionError> {
        self.as_dyn_mut().set_y(index, y)
    }

    fn insert_point(&mut self, point: Point) -> Result<(), TabulatedFunctionError> {
        self.as_dyn_mut().insert_point(point)
    }

    fn delete_point(&mut self, index: usize) -> Result<(), TabulatedFunctionError> {
        self.as_dyn_mut().delete_point(index)
    }

    fn points(&self) -> Points<'_> {
        self.as_dyn().points()
    }

    fn duplicate(&self) -> Box<dyn TabulatedFunction> {
        self.as_dyn().duplicate()
    }
}

impl Validate for Tabulated {
    fn validate(&self) -> ValidationResult {
        match self {
            Tabulated::Array(function) => function.validate(),
            Tabulated::Linked(function) => function.validate(),
        }
    }
}
