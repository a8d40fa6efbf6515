//! Symmetric cubature rules on reference polytopes.
//!
//! A symmetric rule is described by a small number of *orbits*. Each orbit is a set of
//! points that are images of one another under the symmetry group of the reference cell,
//! determined by a handful of free parameters and carrying a single shared weight. Rather
//! than solving for every point independently, a nonlinear solver works on the compact
//! parameter vector and uses the functionality in this crate to
//!
//! - expand parameters into explicit points ([`Domain::expand_orbit`], [`layout::OrbitLayout`]),
//! - keep the parameters admissible ([`Domain::clamp_orbit`], [`Domain::canonicalize_orbit`]),
//! - draw random restart points ([`Domain::seed_orbit`]),
//! - evaluate an orthonormal polynomial basis at the points ([`Domain::populate_basis`]) and
//!   form moment residuals ([`moments`]).
//!
//! The triangular prism is provided by [`prism::PrismDomain`].
use nalgebra::RealField;

pub mod domain;
pub mod error;
pub mod layout;
pub mod moments;
pub mod prism;
pub mod quadrature;

#[cfg(feature = "proptest")]
pub mod proptest;

pub use domain::{Domain, OrbitDescriptor, ShapeDescriptor};
pub use error::Error;
pub use symquad_quadrature::polynomial;

pub extern crate nalgebra;

/// Scalar type used for parameters, points and basis values.
///
/// Any real field that is `Copy` will do, which covers `f32`, `f64` and fixed-size
/// extended precision types such as double-double arithmetic. Heap-backed arbitrary precision
/// floats are not `Copy` and therefore not supported.
pub trait Real: RealField + Copy {}

impl<T: RealField + Copy> Real for T {}
