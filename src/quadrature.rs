//! Explicit quadrature rules as pairs of weights and points.
use crate::Real;
use nalgebra::{convert, OPoint, Point3, U3};

pub type QuadraturePair<T, D> = (Vec<T>, Vec<OPoint<T, D>>);
pub type QuadraturePair3d<T> = QuadraturePair<T, U3>;

fn convert_quadrature_rule_from_3d_f64<T>(quadrature: symquad_quadrature::Rule3d) -> QuadraturePair3d<T>
where
    T: Real,
{
    let (weights, points) = quadrature;
    let weights = weights.into_iter().map(convert).collect();
    let points = points.into_iter().map(Point3::from).map(convert).collect();
    (weights, points)
}

/// Collapsed Gauss rule on the reference prism with `n` points per direction.
///
/// Integrates polynomials of total degree up to `2n - 2` exactly. See
/// [`symquad_quadrature::tensor::prism_collapsed_gauss`].
pub fn prism_collapsed_gauss<T: Real>(num_points_per_dim: usize) -> QuadraturePair3d<T> {
    convert_quadrature_rule_from_3d_f64(symquad_quadrature::tensor::prism_collapsed_gauss(num_points_per_dim))
}
