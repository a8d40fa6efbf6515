//! Bookkeeping for rules made up of several orbits.
//!
//! A rule is described by an orbit-count vector: entry `i` states how many distinct copies of
//! orbit `i` the rule contains. An [`OrbitLayout`] lays out the parameters and points of all
//! copies back to back, ordered by orbit index, and applies the per-orbit operations of a
//! [`Domain`] to whole parameter vectors.
use crate::domain::{Domain, OrbitDescriptor, ShapeDescriptor};
use crate::error::Error;
use crate::quadrature::QuadraturePair;
use crate::Real;
use log::debug;
use nalgebra::allocator::Allocator;
use nalgebra::{DefaultAllocator, OPoint};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of copies of each orbit in a rule, indexed by orbit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrbitCounts(Vec<usize>);

impl OrbitCounts {
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }

    /// Total number of orbit copies.
    pub fn num_orbits(&self) -> usize {
        self.0.iter().sum()
    }

    /// Total number of points for the given orbit table.
    pub fn num_points(&self, orbits: &[OrbitDescriptor]) -> usize {
        self.0.iter().zip(orbits).map(|(n, orbit)| n * orbit.num_points).sum()
    }

    /// Total number of free parameters for the given orbit table.
    pub fn num_params(&self, orbits: &[OrbitDescriptor]) -> usize {
        self.0.iter().zip(orbits).map(|(n, orbit)| n * orbit.num_params).sum()
    }
}

impl From<Vec<usize>> for OrbitCounts {
    fn from(counts: Vec<usize>) -> Self {
        Self(counts)
    }
}

impl<const N: usize> From<[usize; N]> for OrbitCounts {
    fn from(counts: [usize; N]) -> Self {
        Self(counts.to_vec())
    }
}

/// A single copy of an orbit within a rule.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OrbitInstance {
    pub orbit: usize,
    pub param_offset: usize,
    pub point_offset: usize,
}

/// Parameter and point offsets of every orbit copy in a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrbitLayout {
    counts: OrbitCounts,
    instances: Vec<OrbitInstance>,
    num_params: usize,
    num_points: usize,
}

impl OrbitLayout {
    /// Lays out the orbits given by `counts` for the given domain.
    ///
    /// Fails if `counts` does not have one entry per orbit of the domain, contains no orbits
    /// at all, or is rejected by [`Domain::validate_orbit_counts`].
    pub fn try_new<D>(domain: &D, counts: impl Into<OrbitCounts>) -> Result<Self, Error>
    where
        D: ShapeDescriptor,
    {
        let counts = counts.into();
        let orbits = domain.orbits();

        if counts.as_slice().len() != orbits.len() {
            return Err(Error::OrbitCountMismatch {
                expected: orbits.len(),
                actual: counts.as_slice().len(),
            });
        }
        if counts.num_orbits() == 0 {
            return Err(Error::EmptyOrbitCombination);
        }
        if !domain.validate_orbit_counts(counts.as_slice()) {
            return Err(Error::InvalidOrbitCombination(counts.into_inner()));
        }

        let mut instances = Vec::with_capacity(counts.num_orbits());
        let mut param_offset = 0;
        let mut point_offset = 0;
        for (orbit, (&count, descriptor)) in counts.as_slice().iter().zip(orbits).enumerate() {
            for _ in 0..count {
                instances.push(OrbitInstance {
                    orbit,
                    param_offset,
                    point_offset,
                });
                param_offset += descriptor.num_params;
                point_offset += descriptor.num_points;
            }
        }

        debug!(
            "Orbit layout {:?}: {} orbits, {} parameters, {} points",
            counts.as_slice(),
            instances.len(),
            param_offset,
            point_offset
        );

        Ok(Self {
            counts,
            instances,
            num_params: param_offset,
            num_points: point_offset,
        })
    }

    pub fn counts(&self) -> &OrbitCounts {
        &self.counts
    }

    pub fn instances(&self) -> &[OrbitInstance] {
        &self.instances
    }

    pub fn num_orbits(&self) -> usize {
        self.instances.len()
    }

    pub fn num_params(&self) -> usize {
        self.num_params
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }

    /// Expands the full parameter vector into the full set of points.
    ///
    /// # Panics
    ///
    /// Panics if `params` or `points` do not have the lengths given by the layout.
    pub fn expand<T, D>(&self, domain: &D, params: &[T], points: &mut [OPoint<T, D::ReferenceDim>])
    where
        T: Real,
        D: Domain<T>,
        DefaultAllocator: Allocator<T, D::ReferenceDim>,
    {
        assert_eq!(params.len(), self.num_params, "Parameter vector has wrong length");
        assert_eq!(points.len(), self.num_points, "Point buffer has wrong length");
        for instance in &self.instances {
            domain.expand_orbit(
                instance.orbit,
                instance.param_offset,
                instance.point_offset,
                params,
                points,
            );
        }
    }

    /// Clamps every orbit's parameters into the admissible region.
    ///
    /// # Panics
    ///
    /// Panics if `params` does not have the length given by the layout.
    pub fn clamp<T, D>(&self, domain: &D, params: &mut [T])
    where
        T: Real,
        D: Domain<T>,
        DefaultAllocator: Allocator<T, D::ReferenceDim>,
    {
        assert_eq!(params.len(), self.num_params, "Parameter vector has wrong length");
        for instance in &self.instances {
            domain.clamp_orbit(instance.orbit, instance.param_offset, params);
        }
    }

    /// Rewrites every orbit's parameters into canonical form.
    ///
    /// # Panics
    ///
    /// Panics if `params` does not have the length given by the layout.
    pub fn canonicalize<T, D>(&self, domain: &D, params: &mut [T])
    where
        T: Real,
        D: Domain<T>,
        DefaultAllocator: Allocator<T, D::ReferenceDim>,
    {
        assert_eq!(params.len(), self.num_params, "Parameter vector has wrong length");
        for instance in &self.instances {
            domain.canonicalize_orbit(instance.orbit, instance.param_offset, params);
        }
    }

    /// Draws a fresh random parameter vector in place.
    ///
    /// # Panics
    ///
    /// Panics if `params` does not have the length given by the layout.
    pub fn seed<T, D, R>(&self, domain: &D, params: &mut [T], rng: &mut R)
    where
        T: Real,
        D: Domain<T>,
        R: Rng,
        DefaultAllocator: Allocator<T, D::ReferenceDim>,
    {
        assert_eq!(params.len(), self.num_params, "Parameter vector has wrong length");
        for instance in &self.instances {
            domain.seed_orbit(instance.orbit, instance.param_offset, params, rng);
        }
    }

    /// Spreads one weight per orbit copy over all the points of that copy.
    ///
    /// # Panics
    ///
    /// Panics if `orbit_weights` does not have one entry per orbit copy, or `point_weights`
    /// not one entry per point.
    pub fn expand_weights<T: Real>(&self, orbit_weights: &[T], point_weights: &mut [T]) {
        assert_eq!(orbit_weights.len(), self.num_orbits(), "Need one weight per orbit");
        assert_eq!(point_weights.len(), self.num_points, "Need one weight per point");
        let point_ends = self
            .instances
            .iter()
            .skip(1)
            .map(|instance| instance.point_offset)
            .chain(Some(self.num_points));
        for ((instance, end), &w) in self.instances.iter().zip(point_ends).zip(orbit_weights) {
            point_weights[instance.point_offset..end].fill(w);
        }
    }

    /// Assembles the explicit rule given by parameters and per-orbit weights.
    pub fn to_quadrature<T, D>(
        &self,
        domain: &D,
        params: &[T],
        orbit_weights: &[T],
    ) -> QuadraturePair<T, D::ReferenceDim>
    where
        T: Real,
        D: Domain<T>,
        DefaultAllocator: Allocator<T, D::ReferenceDim>,
    {
        let mut points = vec![OPoint::origin(); self.num_points];
        let mut weights = vec![T::zero(); self.num_points];
        self.expand(domain, params, &mut points);
        self.expand_weights(orbit_weights, &mut weights);
        (weights, points)
    }
}
