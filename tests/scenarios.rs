#![cfg(test)]

mod test_utils;

use std::f64::consts::PI;

use pretty_assertions::assert_eq;
use test_utils::{assert_float_eq, init_logger, points, xs};

use tabulated::{
    ArrayTabulatedFunction, Backing, FnFunction, Function, LinkedTabulatedFunction, Point,
    Tabulated, TabulatedFunction, TabulatedFunctionError, TabulatedFunctions, integrate,
    types::{Validate, ValidationResult},
};

fn squares_on_grid(backing: Backing) -> Tabulated {
    backing
        .factory()
        .create_with_values(0.0, 10.0, &[0.0, 1.0, 4.0, 9.0, 16.0])
        .unwrap()
}

fn squares_at_integers(backing: Backing) -> Tabulated {
    let points: Vec<Point> = (0..5)
        .map(|i| Point::new(i as f64, (i * i) as f64))
        .collect();
    backing.factory().create_from_points(&points).unwrap()
}

#[test]
fn test_squares_on_uniform_grid() {
    init_logger();
    for backing in Backing::ALL {
        let function = squares_on_grid(backing);

        assert_eq!(xs(&function), vec![0.0, 2.5, 5.0, 7.5, 10.0]);
        assert_eq!(function.value_at(2.5), 1.0);
        assert_float_eq(function.value_at(3.75), 2.5, 1e-12);
    }
}

#[test]
fn test_squares_at_integer_abscissas() {
    init_logger();
    for backing in Backing::ALL {
        let function = squares_at_integers(backing);
        assert_float_eq(function.value_at(2.5), 6.5, 1e-10);
    }
}

#[test]
fn test_delete_from_grid() {
    init_logger();
    for backing in Backing::ALL {
        let mut function = squares_on_grid(backing);
        function.delete_point(2).unwrap();

        assert_eq!(function.count(), 4);
        assert_eq!(xs(&function), vec![0.0, 2.5, 7.5, 10.0]);
        assert_float_eq(function.value_at(5.0), 5.0, 1e-12);
    }
}

#[test]
fn test_delete_from_two_points_fails() {
    init_logger();
    for backing in Backing::ALL {
        let mut function = backing.factory().create(0.0, 1.0, 2).unwrap();
        let before = points(&function);

        assert_eq!(
            function.delete_point(0),
            Err(TabulatedFunctionError::MinimumSizeViolation { count: 2 })
        );
        assert_eq!(points(&function), before);
    }
}

#[test]
fn test_sine_into_five_points() {
    init_logger();
    let sine = FnFunction::new(0.0, PI, f64::sin);
    let functions = TabulatedFunctions::default();

    for backing in Backing::ALL {
        let function = functions.tabulate_with(backing, &sine, 0.0, PI, 5).unwrap();

        let expected = [0.0, PI / 4.0, PI / 2.0, 3.0 * PI / 4.0, PI];
        assert_eq!(function.count(), expected.len());
        for (point, x) in function.points().zip(expected) {
            assert_float_eq(point.x(), x, 1e-12);
            assert_eq!(point.y(), sine.value_at(point.x()));
        }
        assert_eq!(function.right_bound(), PI);
    }
}

#[test]
fn test_exact_samples_and_outside_domain() {
    for backing in Backing::ALL {
        let function = squares_at_integers(backing);
        for point in points(&function) {
            assert_float_eq(function.value_at(point.x()), point.y(), 1e-10);
        }
        assert!(function.value_at(-0.5).is_nan());
        assert!(function.value_at(4.5).is_nan());
        assert!(function.value_at(f64::NAN).is_nan());
    }
}

#[test]
fn test_linear_between_samples() {
    let function = squares_at_integers(Backing::Linked);
    for step in 0..=10 {
        let t = step as f64 / 10.0;
        assert_float_eq(function.value_at(3.0 + t), 9.0 + 7.0 * t, 1e-10);
    }
}

#[test]
fn test_insert_then_delete_restores_points() {
    init_logger();
    for backing in Backing::ALL {
        let mut function = squares_at_integers(backing);
        let before = points(&function);

        function.insert_point(Point::new(1.25, -3.0)).unwrap();
        assert_eq!(function.point_at(2).unwrap(), Point::new(1.25, -3.0));
        function.delete_point(2).unwrap();

        assert_eq!(points(&function), before);
    }
}

#[test]
fn test_insert_duplicate_abscissa_fails() {
    for backing in Backing::ALL {
        let mut function = squares_at_integers(backing);
        let err = function.insert_point(Point::new(2.0 + 1e-12, 0.0)).unwrap_err();

        assert!(err.is_order_violation());
        assert_eq!(function.count(), 5);
    }
}

#[test]
fn test_duplicate_is_independent() {
    for backing in Backing::ALL {
        let original = squares_at_integers(backing);
        let mut copy = original.duplicate();
        assert!(copy.equals(&original));

        copy.set_y(0, 100.0).unwrap();
        copy.insert_point(Point::new(10.0, 0.0)).unwrap();

        assert_eq!(original.y_at(0).unwrap(), 0.0);
        assert_eq!(original.count(), 5);
        assert!(!copy.equals(&original));
    }
}

#[test]
fn test_getters_return_copies() {
    let function = ArrayTabulatedFunction::from_points(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)])
        .unwrap();

    let mut point = function.point_at(0).unwrap();
    point.set_x(5.0);

    assert_eq!(function.point_at(0).unwrap(), Point::new(0.0, 0.0));
    assert!(function.validate().is_valid());
}

#[test]
fn test_backings_compare_equal() {
    let array = ArrayTabulatedFunction::with_values(0.0, 1.0, &[1.0, 2.0, 3.0]).unwrap();
    let linked = LinkedTabulatedFunction::with_values(0.0, 1.0, &[1.0, 2.0, 3.0]).unwrap();

    assert!(array == linked);
    assert_eq!(array.to_string(), linked.to_string());
    assert_eq!(array.to_string(), "{(0; 1), (0.5; 2), (1; 3)}");
}

#[test]
fn test_set_point_respects_order() {
    for backing in Backing::ALL {
        let mut function = squares_at_integers(backing);

        function.set_point(2, Point::new(2.5, 6.25)).unwrap();
        assert!(matches!(
            function.set_point(2, Point::new(3.0, 0.0)),
            Err(TabulatedFunctionError::OrderViolation { index: 2, .. })
        ));
        assert_eq!(function.point_at(2).unwrap(), Point::new(2.5, 6.25));

        assert!(matches!(
            function.point_at(5),
            Err(TabulatedFunctionError::IndexOutOfBounds { index: 5, count: 5 })
        ));
    }
}

#[test]
fn test_integrate_tabulated() {
    let function = squares_at_integers(Backing::Array);
    // piecewise linear through the squares: sum of trapezoids of width 1
    let integral = integrate(&function, 0.0, 4.0, 0.25).unwrap();
    assert_float_eq(integral, 0.5 + 2.5 + 6.5 + 12.5, 1e-9);
}

#[test]
fn test_non_finite_ordinate_is_a_warning() {
    init_logger();
    let function = LinkedTabulatedFunction::from_points(&[
        Point::new(0.0, f64::NAN),
        Point::new(1.0, 1.0),
    ])
    .unwrap();

    assert!(matches!(
        function.validate(),
        ValidationResult::Warnings(_, warnings) if warnings.len() == 1
    ));
    assert!(function.value_at(0.5).is_nan());
}
