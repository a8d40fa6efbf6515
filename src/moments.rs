//! Moment equations for symmetric rules.
//!
//! A rule with weights $w_m$ and points $x_m$ integrates the basis exactly if
//!
//! $$ \sum_m w_m \psi_i(x_m) = \int_\Omega \psi_i \, \mathrm{d}x $$
//!
//! for every basis function $\psi_i$. Since the basis is orthonormal and contains the
//! constant function $1 / \sqrt{|\Omega|}$, the right-hand side vanishes for every function
//! except the constant one, where it equals $\sqrt{|\Omega|}$.
use crate::domain::Domain;
use crate::layout::OrbitLayout;
use crate::Real;
use itertools::izip;
use nalgebra::allocator::Allocator;
use nalgebra::{DMatrix, DMatrixViewMut, DVector, DefaultAllocator, OPoint};

/// Exact integrals of the domain's basis functions.
pub fn exact_moments<T, D>(domain: &D) -> DVector<T>
where
    T: Real,
    D: Domain<T>,
    DefaultAllocator: Allocator<T, D::ReferenceDim>,
{
    let mut moments = DVector::zeros(domain.basis_count());
    if !moments.is_empty() {
        moments[0] = domain.reference_volume().sqrt();
    }
    moments
}

/// Evaluates the basis at every point, one row per basis function and one column per point.
pub fn evaluate_basis<T, D>(domain: &D, points: &[OPoint<T, D::ReferenceDim>]) -> DMatrix<T>
where
    T: Real,
    D: Domain<T>,
    DefaultAllocator: Allocator<T, D::ReferenceDim>,
{
    let mut basis_values = DMatrix::zeros(domain.basis_count(), points.len());
    domain.populate_basis(DMatrixViewMut::from(&mut basis_values), points);
    basis_values
}

/// Computes the matrix $A$ whose column $o$ is the sum of basis values over the points of
/// orbit copy $o$, so that $A w$ is the vector of moments of the rule with per-orbit
/// weights $w$.
///
/// # Panics
///
/// Panics if `points` does not match the layout, or `out` is not of size
/// `basis_count() x layout.num_orbits()`.
pub fn orbit_basis_sums<T, D>(
    domain: &D,
    layout: &OrbitLayout,
    points: &[OPoint<T, D::ReferenceDim>],
    mut out: DMatrixViewMut<T>,
) where
    T: Real,
    D: Domain<T>,
    DefaultAllocator: Allocator<T, D::ReferenceDim>,
{
    assert_eq!(points.len(), layout.num_points(), "Point buffer has wrong length");
    assert_eq!(out.nrows(), domain.basis_count());
    assert_eq!(out.ncols(), layout.num_orbits());

    let basis_values = evaluate_basis(domain, points);
    for (mut column, instance) in izip!(out.column_iter_mut(), layout.instances()) {
        let num_points = domain.orbit(instance.orbit).num_points;
        let orbit_values = basis_values.columns(instance.point_offset, num_points);
        column.copy_from(&orbit_values.column_sum());
    }
}

/// Residuals $A w - b$ of the moment equations for a rule given by its orbit parameters and
/// one weight per orbit copy.
///
/// # Panics
///
/// Panics if `params` or `orbit_weights` do not match the layout.
pub fn moment_residuals<T, D>(domain: &D, layout: &OrbitLayout, params: &[T], orbit_weights: &[T]) -> DVector<T>
where
    T: Real,
    D: Domain<T>,
    DefaultAllocator: Allocator<T, D::ReferenceDim>,
{
    assert_eq!(orbit_weights.len(), layout.num_orbits(), "Need one weight per orbit");

    let mut points = vec![OPoint::origin(); layout.num_points()];
    layout.expand(domain, params, &mut points);

    let mut sums = DMatrix::zeros(domain.basis_count(), layout.num_orbits());
    orbit_basis_sums(domain, layout, &points, DMatrixViewMut::from(&mut sums));

    sums * DVector::from_column_slice(orbit_weights) - exact_moments(domain)
}

/// Residuals of the moment equations for an explicit rule.
///
/// # Panics
///
/// Panics if the number of weights and points differ.
pub fn rule_residuals<T, D>(domain: &D, weights: &[T], points: &[OPoint<T, D::ReferenceDim>]) -> DVector<T>
where
    T: Real,
    D: Domain<T>,
    DefaultAllocator: Allocator<T, D::ReferenceDim>,
{
    assert_eq!(weights.len(), points.len(), "Need one weight per point");
    evaluate_basis(domain, points) * DVector::from_column_slice(weights) - exact_moments(domain)
}

/// Approximates the Gram matrix $\int_\Omega \psi_i \psi_j \, \mathrm{d}x$ of the basis with
/// the given rule.
///
/// For a rule that is exact for products of basis functions, the result is the identity.
pub fn basis_gram_matrix<T, D>(domain: &D, weights: &[T], points: &[OPoint<T, D::ReferenceDim>]) -> DMatrix<T>
where
    T: Real,
    D: Domain<T>,
    DefaultAllocator: Allocator<T, D::ReferenceDim>,
{
    assert_eq!(weights.len(), points.len(), "Need one weight per point");
    let basis_values = evaluate_basis(domain, points);
    let mut weighted = basis_values.clone();
    for (mut column, &w) in izip!(weighted.column_iter_mut(), weights) {
        column *= w;
    }
    weighted * basis_values.transpose()
}
