//! Rules for the reference triangle and prism built from tensor products of Gauss rules.
//!
//! The triangle is obtained from the square `[-1, 1]^2` by the collapsed (Duffy)
//! transformation
//!
//! ```text
//!     p = (1 + a)(1 - b) / 2 - 1,    q = b,
//! ```
//!
//! whose Jacobian determinant is `(1 - b) / 2`. The extra factor raises the degree in `b`
//! by one, so `n` points per direction integrate polynomials of total degree `2n - 2`
//! exactly.

use crate::univariate::gauss;
use crate::{Rule2d, Rule3d};

/// A collapsed Gauss rule for the reference triangle `(-1, -1)`, `(1, -1)`, `(-1, 1)`.
///
/// # Panics
///
/// Panics if zero points are requested.
pub fn triangle_collapsed_gauss(num_points_per_dim: usize) -> Rule2d {
    let n = num_points_per_dim;
    let (weights1d, points1d) = gauss(n);
    let mut weights2d = Vec::with_capacity(n * n);
    let mut points2d = Vec::with_capacity(n * n);

    let rule1d_iter = || weights1d.iter().zip(&points1d);

    for (&wa, &[a]) in rule1d_iter() {
        for (&wb, &[b]) in rule1d_iter() {
            let p = 0.5 * (1.0 + a) * (1.0 - b) - 1.0;
            weights2d.push(wa * wb * 0.5 * (1.0 - b));
            points2d.push([p, b]);
        }
    }

    (weights2d, points2d)
}

/// A collapsed Gauss rule for the reference prism.
///
/// The rule is the tensor product of [`triangle_collapsed_gauss`] with the Gauss rule along
/// the extrusion axis, using the same number of points in every direction.
///
/// # Panics
///
/// Panics if zero points are requested.
pub fn prism_collapsed_gauss(num_points_per_dim: usize) -> Rule3d {
    let n = num_points_per_dim;
    let (weights_tri, points_tri) = triangle_collapsed_gauss(n);
    let (weights_z, points_z) = gauss(n);
    let mut weights3d = Vec::with_capacity(n * n * n);
    let mut points3d = Vec::with_capacity(n * n * n);

    for (&w_pq, &[p, q]) in weights_tri.iter().zip(&points_tri) {
        for (&w_z, &[z]) in weights_z.iter().zip(&points_z) {
            weights3d.push(w_pq * w_z);
            points3d.push([p, q, z]);
        }
    }

    (weights3d, points3d)
}
