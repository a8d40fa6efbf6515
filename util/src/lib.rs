//! Test helpers shared by the `symquad` test suites.
use nalgebra::Point3;

/// Poor man's approx assertion for matrices
#[macro_export]
macro_rules! assert_approx_matrix_eq {
    ($x:expr, $y:expr, abstol = $tol:expr) => {{
        let diff = &$x - &$y;

        let max_absdiff = diff.abs().max();
        let approx_eq = max_absdiff <= $tol;

        if !approx_eq {
            println!("abstol: {:e}", $tol);
            println!("left: {}", $x);
            println!("right: {}", $y);
            println!("diff: {:e}", diff);
        }
        assert!(approx_eq);
    }};
}

#[macro_export]
macro_rules! assert_panics {
    ($e:expr) => {{
        use std::panic::catch_unwind;
        use std::stringify;
        let expr_string = stringify!($e);
        let result = catch_unwind(|| $e);
        if result.is_ok() {
            panic!("assert_panics!({}) failed.", expr_string);
        }
    }};
}

/// Recovers the barycentric coordinates of the triangular cross-section of a point in the
/// reference prism.
pub fn prism_barycentric(point: &Point3<f64>) -> [f64; 3] {
    let l2 = 0.5 * (point.x + 1.0);
    let l3 = 0.5 * (point.y + 1.0);
    [1.0 - l2 - l3, l2, l3]
}

/// The given coordinates in ascending order.
pub fn sorted<const N: usize>(mut values: [f64; N]) -> [f64; N] {
    values.sort_by(|a, b| a.partial_cmp(b).expect("values must not be NaN"));
    values
}

/// Checks whether the point lies in the reference prism, up to the given tolerance.
pub fn is_in_reference_prism(point: &Point3<f64>, tol: f64) -> bool {
    let [l1, l2, l3] = prism_barycentric(point);
    [l1, l2, l3].iter().all(|&l| l >= -tol && l <= 1.0 + tol) && point.z.abs() <= 1.0 + tol
}
