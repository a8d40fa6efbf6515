//! Orbits and orthonormal basis of the reference triangular prism.
//!
//! The reference prism is the triangle with vertices `(-1, -1)`, `(1, -1)`, `(-1, 1)`
//! extruded along `z` over `[-1, 1]`. Points in the triangular cross-section are described by
//! barycentric coordinates $(\lambda_1, \lambda_2, \lambda_3)$, which map to Cartesian
//! coordinates as
//!
//! ```text
//!     x = -l1 + l2 - l3,    y = -l1 - l2 + l3.
//! ```
//!
//! The symmetry group of the prism is generated by the permutations of the barycentric
//! coordinates together with the reflection `z -> -z`, giving six orbit types:
//!
//! | orbit | points | params | representative                        |
//! |-------|--------|--------|---------------------------------------|
//! | 0     | 1      | 0      | centroid                              |
//! | 1     | 2      | 1      | centroid at `z = ±c`                  |
//! | 2     | 3      | 1      | `(a, a, 1 - 2a)` at `z = 0`           |
//! | 3     | 6      | 2      | `(a, a, 1 - 2a)` at `z = ±c`          |
//! | 4     | 6      | 2      | `(a, b, 1 - a - b)` at `z = 0`        |
//! | 5     | 12     | 3      | `(a, b, 1 - a - b)` at `z = ±c`       |
use crate::domain::{Domain, OrbitDescriptor, ShapeDescriptor};
use crate::quadrature::{prism_collapsed_gauss, QuadraturePair3d};
use crate::Real;
use log::trace;
use nalgebra::{convert, DMatrixViewMut, Point3, U3};
use numeric_literals::replace_float_literals;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::iter::StepBy;
use std::ops::RangeInclusive;
use symquad_quadrature::polynomial::JacobiSequence;

/// Orbit table of the reference prism, indexed by orbit.
pub const PRISM_ORBITS: [OrbitDescriptor; 6] = [
    OrbitDescriptor::new(1, 0),
    OrbitDescriptor::new(2, 1),
    OrbitDescriptor::new(3, 1),
    OrbitDescriptor::new(6, 2),
    OrbitDescriptor::new(6, 2),
    OrbitDescriptor::new(12, 3),
];

/// The reference prism with an orthonormal basis truncated at a given strength.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrismDomain {
    strength: usize,
}

impl PrismDomain {
    pub fn new(strength: usize) -> Self {
        Self { strength }
    }

    pub fn with_strength(self, strength: usize) -> Self {
        Self { strength, ..self }
    }

    /// A reference rule that integrates products of any two basis functions exactly.
    pub fn reference_quadrature<T: Real>(&self) -> QuadraturePair3d<T> {
        // Collapsed Gauss with n points per direction is exact up to total degree 2n - 2
        prism_collapsed_gauss(self.strength + 1)
    }
}

// The basis is enumerated by three nested degree ranges. Both the basis count and the
// evaluation loop are written in terms of these, so the two cannot drift apart.

fn triangle_a_degrees(strength: usize) -> StepBy<RangeInclusive<usize>> {
    (0..=strength).step_by(2)
}

fn triangle_b_degrees(strength: usize, i: usize) -> RangeInclusive<usize> {
    i..=strength - i
}

fn axial_degrees(strength: usize, i: usize, j: usize) -> StepBy<RangeInclusive<usize>> {
    (0..=strength - i - j).step_by(2)
}

/// Degree triples `[i, j, k]` of the prism basis for the given strength, in evaluation order.
pub fn prism_basis_degrees(strength: usize) -> impl Iterator<Item = [usize; 3]> {
    triangle_a_degrees(strength).flat_map(move |i| {
        triangle_b_degrees(strength, i)
            .flat_map(move |j| axial_degrees(strength, i, j).map(move |k| [i, j, k]))
    })
}

/// Number of prism basis functions for the given strength.
pub fn prism_basis_count(strength: usize) -> usize {
    let mut count = 0;
    for i in triangle_a_degrees(strength) {
        for j in triangle_b_degrees(strength, i) {
            count += axial_degrees(strength, i, j).count();
        }
    }
    count
}

fn bary_to_cart<T: Real>(l1: T, l2: T, l3: T, z: T) -> Point3<T> {
    Point3::new(-l1 + l2 - l3, -l1 - l2 + l3, z)
}

/// The three rotations of `(a, a, 1 - 2a)`.
#[replace_float_literals(T::from_f64(literal).unwrap())]
fn edge_images<T: Real>(a: T) -> [[T; 3]; 3] {
    let c = 1.0 - 2.0 * a;
    [[a, a, c], [a, c, a], [c, a, a]]
}

/// The six permutations of `(a, b, 1 - a - b)`.
#[replace_float_literals(T::from_f64(literal).unwrap())]
fn generic_images<T: Real>(a: T, b: T) -> [[T; 3]; 6] {
    let c = 1.0 - a - b;
    [[a, b, c], [a, c, b], [b, a, c], [b, c, a], [c, a, b], [c, b, a]]
}

/// Writes every barycentric image at each of the given heights, heights varying slowest.
fn write_images<T: Real>(out: &mut [Point3<T>], images: &[[T; 3]], heights: &[T]) {
    assert_eq!(out.len(), images.len() * heights.len());
    let targets = heights
        .iter()
        .flat_map(|&z| images.iter().map(move |&[l1, l2, l3]| bary_to_cart(l1, l2, l3, z)));
    for (point, target) in out.iter_mut().zip(targets) {
        *point = target;
    }
}

/// Clamps `x` into `[lo, hi]`, mapping NaN to `lo`.
fn clamp_to<T: Real>(lo: T, x: T, hi: T) -> T {
    if x >= lo {
        if x <= hi {
            x
        } else {
            hi
        }
    } else {
        lo
    }
}

fn uniform<T: Real>(rng: &mut impl Rng, lo: f64, hi: f64) -> T {
    convert(rng.gen_range(lo..=hi))
}

fn seed_triangle_edge<T: Real>(rng: &mut impl Rng) -> T {
    uniform(rng, 0.0, 0.5)
}

fn seed_triangle_generic<T: Real>(rng: &mut impl Rng) -> T {
    uniform(rng, 0.0, 1.0 / 3.0)
}

/// Axial offset `sqrt(1 - u^2)` for uniform `u` in `[-1, 1]`, which favours offsets near the
/// end caps.
fn seed_axial<T: Real>(rng: &mut impl Rng) -> T {
    let u: T = uniform(rng, -1.0, 1.0);
    (T::one() - u * u).max(T::zero()).sqrt()
}

fn bad_orbit(orbit: usize) -> ! {
    panic!("Bad orbit {} for prism domain", orbit)
}

impl ShapeDescriptor for PrismDomain {
    fn orbits(&self) -> &[OrbitDescriptor] {
        &PRISM_ORBITS
    }

    fn strength(&self) -> usize {
        self.strength
    }

    fn basis_count(&self) -> usize {
        prism_basis_count(self.strength)
    }

    fn validate_orbit_counts(&self, counts: &[usize]) -> bool {
        // A second centroid would coincide with the first
        counts.len() == PRISM_ORBITS.len() && counts[0] <= 1
    }
}

impl<T: Real> Domain<T> for PrismDomain {
    type ReferenceDim = U3;

    #[replace_float_literals(T::from_f64(literal).unwrap())]
    fn reference_volume(&self) -> T {
        4.0
    }

    #[replace_float_literals(T::from_f64(literal).unwrap())]
    fn expand_orbit(
        &self,
        orbit: usize,
        param_offset: usize,
        point_offset: usize,
        params: &[T],
        points: &mut [Point3<T>],
    ) {
        let OrbitDescriptor { num_points, num_params } = self.orbit(orbit);
        let args = &params[param_offset..param_offset + num_params];
        let out = &mut points[point_offset..point_offset + num_points];
        let third = 1.0 / 3.0;
        let centroid = [[third, third, third]];

        match (orbit, args) {
            (0, &[]) => write_images(out, &centroid, &[0.0]),
            (1, &[c]) => write_images(out, &centroid, &[-c, c]),
            (2, &[a]) => write_images(out, &edge_images(a), &[0.0]),
            (3, &[a, c]) => write_images(out, &edge_images(a), &[-c, c]),
            (4, &[a, b]) => write_images(out, &generic_images(a, b), &[0.0]),
            (5, &[a, b, c]) => write_images(out, &generic_images(a, b), &[-c, c]),
            _ => bad_orbit(orbit),
        }
    }

    #[replace_float_literals(T::from_f64(literal).unwrap())]
    fn clamp_orbit(&self, orbit: usize, param_offset: usize, params: &mut [T]) {
        let num_params = self.orbit(orbit).num_params;
        let args = &mut params[param_offset..param_offset + num_params];
        let mut before = [T::zero(); 3];
        before[..num_params].copy_from_slice(args);

        match (orbit, args) {
            (0, []) => {}
            (1, [c]) => *c = clamp_to(0.0, *c, 1.0),
            (2, [a]) => *a = clamp_to(0.0, *a, 0.5),
            (3, [a, c]) => {
                *a = clamp_to(0.0, *a, 0.5);
                *c = clamp_to(0.0, *c, 1.0);
            }
            (4, [a, b]) => {
                *a = clamp_to(0.0, *a, 1.0);
                *b = clamp_to(0.0, *b, 1.0 - *a);
            }
            (5, [a, b, c]) => {
                *a = clamp_to(0.0, *a, 1.0);
                *b = clamp_to(0.0, *b, 1.0 - *a);
                *c = clamp_to(0.0, *c, 1.0);
            }
            _ => bad_orbit(orbit),
        }

        let after = &params[param_offset..param_offset + num_params];
        if after != &before[..num_params] {
            trace!(
                "Clamped parameters of orbit {} from {:?} to {:?}",
                orbit,
                &before[..num_params],
                after
            );
        }
    }

    #[replace_float_literals(T::from_f64(literal).unwrap())]
    fn canonicalize_orbit(&self, orbit: usize, param_offset: usize, params: &mut [T]) {
        match orbit {
            0..=3 => {}
            4 | 5 => {
                let a = params[param_offset];
                let b = params[param_offset + 1];
                let mut baryc = [a, b, 1.0 - a - b];
                baryc.sort_by(|x, y| x.partial_cmp(y).unwrap_or(Ordering::Equal));
                params[param_offset..param_offset + 2].copy_from_slice(&baryc[..2]);
            }
            _ => bad_orbit(orbit),
        }
    }

    fn seed_orbit<R: Rng>(&self, orbit: usize, param_offset: usize, params: &mut [T], rng: &mut R) {
        let num_params = self.orbit(orbit).num_params;
        let args = &mut params[param_offset..param_offset + num_params];

        match (orbit, &mut *args) {
            (0, []) => {}
            (1, [c]) => *c = seed_axial(rng),
            (2, [a]) => *a = seed_triangle_edge(rng),
            (3, [a, c]) => {
                *a = seed_triangle_edge(rng);
                *c = seed_axial(rng);
            }
            (4, [a, b]) => {
                *a = seed_triangle_generic(rng);
                *b = seed_triangle_generic(rng);
            }
            (5, [a, b, c]) => {
                *a = seed_triangle_generic(rng);
                *b = seed_triangle_generic(rng);
                *c = seed_axial(rng);
            }
            _ => bad_orbit(orbit),
        }
        trace!("Seeded orbit {} with {:?}", orbit, args);

        // Sampling ranges sit inside the admissible region up to rounding at the boundary
        self.clamp_orbit(orbit, param_offset, params);
    }

    /// Evaluates the orthonormal basis
    ///
    /// $$
    /// \psi_{ijk}(p, q, r) = C_{ijk} (1 - q)^i P_i(a) P_j^{(2i + 1, 0)}(q) P_k(r),
    /// \qquad a = \frac{2(1 + p)}{1 - q} - 1,
    /// $$
    ///
    /// with $C_{ijk} = 2^{-i-1} \sqrt{(2i + 1)(2k + 1)(i + j + 1)}$, where $P_n$ are the
    /// Legendre polynomials and $i$, $k$ only take even values. At the collapsed vertex
    /// `q = 1` the coordinate `a` is set to zero.
    #[replace_float_literals(T::from_f64(literal).unwrap())]
    fn populate_basis(&self, mut basis_values: DMatrixViewMut<T>, points: &[Point3<T>]) {
        let s = self.strength;
        assert_eq!(
            basis_values.nrows(),
            prism_basis_count(s),
            "Basis matrix must have one row per basis function"
        );
        assert_eq!(
            basis_values.ncols(),
            points.len(),
            "Basis matrix must have one column per point"
        );

        for (mut column, point) in basis_values.column_iter_mut().zip(points) {
            let (p, q, r) = (point.x, point.y, point.z);
            let a = if q != 1.0 { 2.0 * (1.0 + p) / (1.0 - q) - 1.0 } else { 0.0 };

            let mut legendre_a = JacobiSequence::legendre(a);
            // (1 - q)^i and 2^(-i - 1)
            let mut pow_1mq_i = 1.0;
            let mut pow_2_mim1 = 0.5;
            let mut row = 0;

            for i in triangle_a_degrees(s) {
                let pa = pow_1mq_i * legendre_a.value(i);
                let mut jacobi_q = JacobiSequence::new(convert((2 * i + 1) as f64), 0.0, q);

                for j in triangle_b_degrees(s, i) {
                    let pab = pa * jacobi_q.value(j);
                    let mut legendre_r = JacobiSequence::legendre(r);

                    for k in axial_degrees(s, i, j) {
                        let c: T = convert(((2 * i + 1) * (2 * k + 1) * (i + j + 1)) as f64);
                        column[row] = pow_2_mim1 * c.sqrt() * pab * legendre_r.value(k);
                        row += 1;
                    }
                }

                pow_1mq_i *= (1.0 - q) * (1.0 - q);
                pow_2_mim1 /= 4.0;
            }

            debug_assert_eq!(row, column.nrows());
        }
    }
}
