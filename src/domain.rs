//! The contract between a reference cell and the rule solver.
use crate::Real;
use nalgebra::allocator::Allocator;
use nalgebra::{DMatrixViewMut, DefaultAllocator, DimName, OPoint};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of points an orbit expands to and number of free parameters it consumes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrbitDescriptor {
    pub num_points: usize,
    pub num_params: usize,
}

impl OrbitDescriptor {
    pub const fn new(num_points: usize, num_params: usize) -> Self {
        Self { num_points, num_params }
    }
}

/// Static description of a reference cell: its orbits and the size of its basis.
pub trait ShapeDescriptor {
    /// The table of orbits supported by the domain, indexed by orbit.
    fn orbits(&self) -> &[OrbitDescriptor];

    /// Returns the descriptor of the given orbit.
    ///
    /// # Panics
    ///
    /// Panics if the orbit index is out of bounds.
    fn orbit(&self, orbit: usize) -> OrbitDescriptor {
        let orbits = self.orbits();
        *orbits
            .get(orbit)
            .unwrap_or_else(|| panic!("Bad orbit {} for domain with {} orbits", orbit, orbits.len()))
    }

    /// The polynomial strength (degree budget) the basis is truncated at.
    fn strength(&self) -> usize;

    /// The number of basis functions evaluated by [`Domain::populate_basis`].
    ///
    /// This equals the number of moment equations a rule of the domain's strength must
    /// satisfy.
    fn basis_count(&self) -> usize;

    /// Determines whether a vector of orbit counts, one entry per orbit, describes an
    /// admissible rule.
    fn validate_orbit_counts(&self, counts: &[usize]) -> bool;
}

/// A reference cell together with its symmetry orbits and orthonormal polynomial basis.
///
/// All per-orbit operations take an orbit index into [`orbits`](ShapeDescriptor::orbits)
/// together with offsets into caller-owned buffers. An implementation reads and writes *only*
/// the ranges `[offset, offset + count)` given by the orbit descriptor, so that the caller may
/// lay out many orbits back to back in a single parameter vector and a single point buffer.
///
/// Unknown orbit indices and buffers that are too short are programming errors, and
/// implementations panic in these cases.
pub trait Domain<T>: ShapeDescriptor
where
    T: Real,
    DefaultAllocator: Allocator<T, Self::ReferenceDim>,
{
    type ReferenceDim: DimName;

    /// The volume of the reference cell.
    fn reference_volume(&self) -> T;

    /// Writes the points of the given orbit into `points[point_offset..]`, reading its
    /// parameters from `params[param_offset..]`.
    fn expand_orbit(
        &self,
        orbit: usize,
        param_offset: usize,
        point_offset: usize,
        params: &[T],
        points: &mut [OPoint<T, Self::ReferenceDim>],
    );

    /// Pulls the parameters of the given orbit back into the admissible region.
    fn clamp_orbit(&self, orbit: usize, param_offset: usize, params: &mut [T]);

    /// Rewrites the parameters of the given orbit into a unique representative among all
    /// parameters that produce the same point set.
    fn canonicalize_orbit(&self, orbit: usize, param_offset: usize, params: &mut [T]);

    /// Draws random admissible parameters for the given orbit.
    fn seed_orbit<R: Rng>(&self, orbit: usize, param_offset: usize, params: &mut [T], rng: &mut R);

    /// Evaluates every basis function at every point.
    ///
    /// Row `i` of `basis_values` receives the values of basis function `i`, column `m` the
    /// values at point `m`.
    ///
    /// # Panics
    ///
    /// Panics if `basis_values` is not of size `basis_count() x points.len()`.
    fn populate_basis(&self, basis_values: DMatrixViewMut<T>, points: &[OPoint<T, Self::ReferenceDim>]);
}
