#![cfg(test)]

mod test_utils;

use proptest::prelude::*;
use test_utils::points;

use tabulated::{
    ArrayTabulatedFunction, Backing, EPSILON, Function, LinkedTabulatedFunction, Point,
    TabulatedFunction, TabulatedFunctions,
    io::{write_binary, write_text},
};

/// Strictly ascending points with gaps well above the tolerance.
fn ascending_points(max: usize) -> impl Strategy<Value = Vec<Point>> {
    (
        -1e3..1e3f64,
        prop::collection::vec((1e-3..10.0f64, -1e6..1e6f64), 1..max),
        -1e6..1e6f64,
    )
        .prop_map(|(start, steps, first_y)| {
            let mut points = vec![Point::new(start, first_y)];
            let mut x = start;
            for (step, y) in steps {
                x += step;
                points.push(Point::new(x, y));
            }
            points
        })
}

#[derive(Debug, Clone)]
enum Op {
    Insert(f64, f64),
    Delete(usize),
    SetY(usize, f64),
    SetX(usize, f64),
    Read(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (-50.0..50.0f64, -10.0..10.0f64).prop_map(|(x, y)| Op::Insert(x, y)),
        (0..64usize).prop_map(Op::Delete),
        (0..64usize, -10.0..10.0f64).prop_map(|(i, y)| Op::SetY(i, y)),
        (0..64usize, -50.0..50.0f64).prop_map(|(i, x)| Op::SetX(i, x)),
        (0..64usize).prop_map(Op::Read),
    ]
}

fn apply(function: &mut dyn TabulatedFunction, op: &Op) -> String {
    let outcome = match *op {
        Op::Insert(x, y) => function.insert_point(Point::new(x, y)).map(|_| None),
        Op::Delete(i) => function.delete_point(i).map(|_| None),
        Op::SetY(i, y) => function.set_y(i, y).map(|_| None),
        Op::SetX(i, x) => function.set_x(i, x).map(|_| None),
        Op::Read(i) => function.point_at(i).map(Some),
    };
    format!("{:?}", outcome)
}

fn assert_ascending(function: &dyn TabulatedFunction) {
    let xs: Vec<f64> = function.points().map(|p| p.x()).collect();
    assert_eq!(xs.len(), function.count());
    assert!(function.count() >= 2);
    for pair in xs.windows(2) {
        assert!(pair[1] - pair[0] >= EPSILON, "{:?}", xs);
    }
}

proptest! {
    #[test]
    fn prop_grid_construction(
        left in -1e3..1e3f64,
        width in 1e-3..1e3f64,
        values in prop::collection::vec(-1e6..1e6f64, 2..64),
    ) {
        for backing in Backing::ALL {
            let function = backing.factory().create_with_values(left, left + width, &values).unwrap();
            prop_assert_eq!(function.count(), values.len());
            prop_assert_eq!(function.left_bound(), left);
            prop_assert_eq!(function.right_bound(), left + width);
            assert_ascending(&function);
        }
    }

    #[test]
    fn prop_point_construction(points_in in ascending_points(64)) {
        let array = ArrayTabulatedFunction::from_points(&points_in).unwrap();
        let linked = LinkedTabulatedFunction::from_points(&points_in).unwrap();

        assert_ascending(&array);
        assert_ascending(&linked);
        prop_assert_eq!(points(&array), points_in.clone());
        prop_assert!(array == linked);
    }

    #[test]
    fn prop_exact_samples(points_in in ascending_points(32)) {
        let function = LinkedTabulatedFunction::from_points(&points_in).unwrap();
        for point in &points_in {
            prop_assert_eq!(function.value_at(point.x()), point.y());
        }
        prop_assert!(function.value_at(points_in[0].x() - 1.0).is_nan());
    }

    #[test]
    fn prop_insert_delete_round_trip(
        points_in in ascending_points(32),
        t in 0.01..0.99f64,
        segment in any::<prop::sample::Index>(),
        y in -1e3..1e3f64,
    ) {
        let k = segment.index(points_in.len() - 1);
        let x = points_in[k].x() + t * (points_in[k + 1].x() - points_in[k].x());

        for backing in Backing::ALL {
            let mut function = backing.factory().create_from_points(&points_in).unwrap();
            function.insert_point(Point::new(x, y)).unwrap();
            prop_assert_eq!(function.x_at(k + 1).unwrap(), x);
            function.delete_point(k + 1).unwrap();
            prop_assert_eq!(points(&function), points_in.clone());
        }
    }

    #[test]
    fn prop_serialization_round_trip(points_in in ascending_points(48)) {
        let functions = TabulatedFunctions::default();
        let original = functions.create_from_points(&points_in).unwrap();

        let mut binary = Vec::new();
        write_binary(&original, &mut binary).unwrap();
        let mut text = Vec::new();
        write_text(&original, &mut text).unwrap();

        for backing in Backing::ALL {
            let from_binary = functions.read_binary_with(backing, binary.as_slice()).unwrap();
            let from_text = functions.read_text_with(backing, text.as_slice()).unwrap();
            prop_assert!(from_binary.equals(&original));
            prop_assert!(from_text.equals(&original));
            for ((a, b), c) in original.points().zip(from_binary.points()).zip(from_text.points()) {
                prop_assert_eq!(a.y().to_bits(), b.y().to_bits());
                prop_assert_eq!(a.y().to_bits(), c.y().to_bits());
            }
        }
    }

    #[test]
    fn prop_backings_agree(
        points_in in ascending_points(16),
        ops in prop::collection::vec(op(), 0..64),
    ) {
        let mut array = ArrayTabulatedFunction::from_points(&points_in).unwrap();
        let mut linked = LinkedTabulatedFunction::from_points(&points_in).unwrap();

        for op in &ops {
            let expected = apply(&mut array, op);
            let actual = apply(&mut linked, op);
            prop_assert_eq!(&actual, &expected, "after {:?}", op);
            prop_assert!(array == linked);

            for index in (0..linked.count()).rev() {
                prop_assert_eq!(linked.point_at(index).unwrap(), array.point_at(index).unwrap());
            }
        }
        assert_ascending(&linked);
    }
}
