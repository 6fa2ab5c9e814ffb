#![allow(dead_code)]

use tabulated::{Point, TabulatedFunction};

// Helper function to assert floating point equality with tolerance
pub fn assert_float_eq(a: f64, b: f64, tolerance: f64) {
    assert!(
        (a - b).abs() < tolerance,
        "Expected {} to be approximately equal to {} (tolerance: {})",
        a,
        b,
        tolerance
    );
}

/// Routes `log` output through the test harness. Safe to call from every test.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn xs(function: &dyn TabulatedFunction) -> Vec<f64> {
    function.points().map(|p| p.x()).collect()
}

pub fn points(function: &dyn TabulatedFunction) -> Vec<Point> {
    function.points().collect()
}
