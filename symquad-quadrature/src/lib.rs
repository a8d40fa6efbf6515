//! Reference quadrature rules for the domains used by `symquad`, together with the
//! orthogonal polynomial recurrences they are built from.
//!
//! The rules in this crate are not meant to be efficient. They are simple, robust rules of
//! arbitrary strength that can be used as a ground truth when checking orthonormality of
//! polynomial bases or the accuracy of symmetric rules produced by `symquad`.
//!
//! All rules are given in double precision on the reference domains
//!
//! - the interval `[-1, 1]`,
//! - the triangle with vertices `(-1, -1)`, `(1, -1)` and `(-1, 1)`,
//! - the prism formed by extruding the above triangle along `z` over `[-1, 1]`.

pub mod polynomial;
pub mod tensor;
pub mod univariate;

/// A D-dimensional point.
pub type Point<const D: usize> = [f64; D];

/// A two-dimensional point.
pub type Point2 = Point<2>;

/// A three-dimensional point.
pub type Point3 = Point<3>;

/// A D-dimensional rule, given as a pair of weights and points.
pub type Rule<const D: usize> = (Vec<f64>, Vec<Point<D>>);

/// A two-dimensional quadrature rule.
pub type Rule2d = Rule<2>;

/// A three-dimensional rule.
pub type Rule3d = Rule<3>;

/// Approximates the integral of `f` with the given rule.
pub fn integrate<const D: usize>(rule: &Rule<D>, f: impl Fn(&Point<D>) -> f64) -> f64 {
    let (weights, points) = rule;
    weights
        .iter()
        .zip(points)
        .map(|(w, x)| w * f(x))
        .sum()
}
