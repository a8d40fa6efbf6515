//! Three-term recurrences for the classical orthogonal polynomials.
//!
//! The same recurrence drives the Gauss-Legendre node computation in this crate and the
//! orthonormal basis evaluation in `symquad`.
use nalgebra::{convert, RealField};

/// Lazily evaluated sequence `P_0(x), P_1(x), ...` of Jacobi polynomials $P_n^{(\alpha, \beta)}$
/// at a fixed point.
///
/// The sequence only moves forward: [`value`](Self::value) advances the recurrence as far as
/// needed and remembers the last two values, so evaluating at increasing degrees costs one
/// recurrence step per degree in total. Legendre polynomials are the special case
/// $\alpha = \beta = 0$, see [`legendre`](Self::legendre).
#[derive(Debug, Clone)]
pub struct JacobiSequence<T> {
    alpha: T,
    beta: T,
    x: T,
    n: usize,
    // P_n(x)
    p1: T,
    // P_{n - 1}(x), zero for n == 0
    p2: T,
}

impl<T> JacobiSequence<T>
where
    T: RealField + Copy,
{
    pub fn new(alpha: T, beta: T, x: T) -> Self {
        Self {
            alpha,
            beta,
            x,
            n: 0,
            p1: T::one(),
            p2: T::zero(),
        }
    }

    pub fn legendre(x: T) -> Self {
        Self::new(T::zero(), T::zero(), x)
    }

    /// The degree of the most recently computed polynomial.
    pub fn degree(&self) -> usize {
        self.n
    }

    /// Returns $P_n(x)$.
    ///
    /// # Panics
    ///
    /// Panics if `n` is smaller than `self.degree() - 1`, since the values of lower degrees
    /// are no longer available.
    pub fn value(&mut self, n: usize) -> T {
        assert!(
            n + 1 >= self.n,
            "Jacobi sequence is at degree {}, cannot go back to degree {}",
            self.n,
            n
        );
        while self.n < n {
            self.advance();
        }
        if n == self.n {
            self.p1
        } else {
            self.p2
        }
    }

    fn advance(&mut self) {
        let Self { alpha, beta, x, .. } = *self;
        let one = T::one();
        let two: T = convert(2.0);
        let n: T = convert((self.n + 1) as f64);

        let next = if self.n == 0 {
            ((alpha + beta + two) * x + (alpha - beta)) / two
        } else {
            //  2n (n + a + b) (c - 2) P_n
            //      = (c - 1) [c (c - 2) x + a^2 - b^2] P_{n-1} - 2 (n + a - 1)(n + b - 1) c P_{n-2}
            // with c = 2n + a + b
            let c = two * n + alpha + beta;
            let a1 = two * n * (n + alpha + beta) * (c - two);
            let a2 = (c - one) * (alpha * alpha - beta * beta);
            let a3 = (c - two) * (c - one) * c;
            let a4 = two * (n + alpha - one) * (n + beta - one) * c;
            ((a2 + a3 * x) * self.p1 - a4 * self.p2) / a1
        };

        self.p2 = self.p1;
        self.p1 = next;
        self.n += 1;
    }
}
