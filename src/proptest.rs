//! Proptest strategies for prism orbits and points.
use crate::prism::PRISM_ORBITS;
use ::proptest::collection::vec;
use ::proptest::prelude::*;
use nalgebra::Point3;

/// Any valid prism orbit index.
pub fn prism_orbit() -> impl Strategy<Value = usize> {
    0..PRISM_ORBITS.len()
}

/// A parameter value that is not necessarily admissible: mostly finite values well outside
/// of the admissible region, and occasionally infinities, NaN, signed zero or values just
/// past the upper bounds.
pub fn raw_param() -> impl Strategy<Value = f64> {
    prop_oneof![
        8 => -2.0..2.0,
        1 => prop_oneof![
            Just(f64::NAN),
            Just(f64::INFINITY),
            Just(f64::NEG_INFINITY),
            Just(-0.0),
            Just(0.5 + f64::EPSILON),
            Just(1.0 + f64::EPSILON),
        ],
    ]
}

/// Parameters of the right length for the orbit, see [`raw_param`].
pub fn raw_prism_orbit_params(orbit: usize) -> impl Strategy<Value = Vec<f64>> {
    vec(raw_param(), PRISM_ORBITS[orbit].num_params)
}

/// An orbit index together with raw parameters for it.
pub fn prism_orbit_with_raw_params() -> impl Strategy<Value = (usize, Vec<f64>)> {
    prism_orbit().prop_flat_map(|orbit| (Just(orbit), raw_prism_orbit_params(orbit)))
}

/// Parameters inside the admissible region of the orbit.
///
/// # Panics
///
/// Panics if the orbit index is out of bounds.
pub fn admissible_prism_orbit_params(orbit: usize) -> BoxedStrategy<Vec<f64>> {
    // For the generic orbits, b is drawn as a fraction of the remaining barycentric mass
    match orbit {
        0 => Just(Vec::new()).boxed(),
        1 => (0.0..=1.0).prop_map(|c| vec![c]).boxed(),
        2 => (0.0..=0.5).prop_map(|a| vec![a]).boxed(),
        3 => (0.0..=0.5, 0.0..=1.0).prop_map(|(a, c)| vec![a, c]).boxed(),
        4 => (0.0..=1.0, 0.0..=1.0)
            .prop_map(|(a, t): (f64, f64)| vec![a, t * (1.0 - a)])
            .boxed(),
        5 => (0.0..=1.0, 0.0..=1.0, 0.0..=1.0)
            .prop_map(|(a, t, c): (f64, f64, f64)| vec![a, t * (1.0 - a), c])
            .boxed(),
        _ => panic!("Bad orbit {} for prism domain", orbit),
    }
}

/// A point in the reference prism.
pub fn point_in_prism() -> impl Strategy<Value = Point3<f64>> {
    // Sample the square and collapse it onto the triangle
    let range = -1.0..=1.0;
    (range.clone(), range.clone(), range).prop_map(|(a, b, z)| Point3::new(0.5 * (1.0 + a) * (1.0 - b) - 1.0, b, z))
}

/// Orbit-count vectors for the prism with at most `max_copies` copies of each orbit,
/// at most one centroid and at least one orbit in total.
pub fn prism_orbit_counts(max_copies: usize) -> impl Strategy<Value = Vec<usize>> {
    (0..=1usize, vec(0..=max_copies, PRISM_ORBITS.len() - 1))
        .prop_map(|(centroids, others)| {
            let mut counts = vec![centroids];
            counts.extend(others);
            counts
        })
        .prop_filter("rule must contain at least one orbit", |counts| {
            counts.iter().sum::<usize>() > 0
        })
}
