//! Quadrature rules for the one-dimensional domain `[-1, 1]`.

use crate::polynomial::JacobiSequence;
use crate::Rule;
use std::f64::consts::PI;

const MAX_NEWTON_ITERATIONS: usize = 50;

/// Returns $P_n(x)$ and $P_{n-1}(x)$.
fn legendre_pair(n: usize, x: f64) -> (f64, f64) {
    let mut legendre = JacobiSequence::legendre(x);
    let p_n = legendre.value(n);
    (p_n, legendre.value(n.saturating_sub(1)))
}

/// Tricomi's asymptotic approximation of the `k`-th largest root of $P_n$, `k = 1, ..., n`.
fn tricomi_root_estimate(n: usize, k: usize) -> f64 {
    let n_f = n as f64;
    let theta = PI * (4.0 * k as f64 - 1.0) / (4.0 * n_f + 2.0);
    (1.0 - 1.0 / (8.0 * n_f * n_f) + 1.0 / (8.0 * n_f * n_f * n_f)) * theta.cos()
}

/// Gauss-Legendre quadrature for the reference interval [-1, 1], with points in ascending
/// order.
///
/// Given `n` points, the rule integrates polynomials of degree up to `2 n - 1` exactly.
///
/// # Panics
///
/// Panics if zero points are requested.
pub fn gauss(num_points: usize) -> Rule<1> {
    let n = num_points;
    assert!(n > 0, "number of points must be positive");
    let n_f = n as f64;

    let mut points = Vec::with_capacity(n);
    let mut weights = Vec::with_capacity(n);

    // Smallest root first
    for k in (1..=n).rev() {
        let mut x = tricomi_root_estimate(n, k);
        for _ in 0..MAX_NEWTON_ITERATIONS {
            // (x^2 - 1) P_n'(x) = n (x P_n(x) - P_{n-1}(x))
            let (p_n, p_nm1) = legendre_pair(n, x);
            let dp_n = n_f * (x * p_n - p_nm1) / (x * x - 1.0);
            let dx = p_n / dp_n;
            x -= dx;
            if dx.abs() <= 4.0 * f64::EPSILON {
                break;
            }
        }

        // Christoffel-Darboux form of the weight, which avoids the derivative
        let (_, p_nm1) = legendre_pair(n, x);
        points.push([x]);
        weights.push(2.0 * (1.0 - x * x) / (n_f * p_nm1).powi(2));
    }

    (weights, points)
}
