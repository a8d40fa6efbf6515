//! Library-wide error type.
use std::fmt;
use std::fmt::{Display, Formatter};

/// Errors that can arise from malformed user input.
///
/// Violations of internal contracts, such as unknown orbit indices or buffers of the wrong
/// size, are programming errors and cause a panic instead.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The orbit-count vector does not have one entry per orbit of the domain.
    OrbitCountMismatch { expected: usize, actual: usize },
    /// The orbit-count vector does not contain any orbits.
    EmptyOrbitCombination,
    /// The domain does not admit the given combination of orbits.
    InvalidOrbitCombination(Vec<usize>),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::OrbitCountMismatch { expected, actual } => {
                write!(
                    f,
                    "Orbit counts must have one entry per orbit ({}), but {} were given",
                    expected, actual
                )
            }
            Self::EmptyOrbitCombination => write!(f, "Orbit combination contains no orbits"),
            Self::InvalidOrbitCombination(counts) => {
                write!(f, "Orbit combination {:?} is not admissible for this domain", counts)
            }
        }
    }
}

impl std::error::Error for Error {}
