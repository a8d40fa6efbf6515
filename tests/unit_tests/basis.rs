use matrixcompare::{assert_matrix_eq, assert_scalar_eq};
use nalgebra::{DMatrix, DMatrixViewMut, Point3};
use proptest::prelude::*;
use symquad::moments::{basis_gram_matrix, evaluate_basis};
use symquad::polynomial::JacobiSequence;
use symquad::prism::{prism_basis_count, prism_basis_degrees, PrismDomain};
use symquad::proptest::point_in_prism;
use symquad::{Domain, ShapeDescriptor};
use util::assert_panics;

/// Counts the basis functions by spelling out the degree loops.
fn count_by_nested_loops(strength: usize) -> usize {
    let mut n = 0;
    let mut i = 0;
    while i <= strength {
        let mut j = i;
        while j + i <= strength {
            let mut k = 0;
            while i + j + k <= strength {
                n += 1;
                k += 2;
            }
            j += 1;
        }
        i += 2;
    }
    n
}

fn sample_points() -> Vec<Point3<f64>> {
    vec![
        Point3::new(-1.0 / 3.0, -1.0 / 3.0, 0.0),
        Point3::new(-0.9, -0.8, 0.95),
        Point3::new(0.5, -0.7, -0.4),
        Point3::new(-0.2, 0.1, 0.3),
        Point3::new(-1.0, -1.0, -1.0),
    ]
}

#[test]
fn basis_count_for_low_strengths() {
    let counts: Vec<_> = (0..=4).map(prism_basis_count).collect();
    assert_eq!(counts, vec![1, 2, 4, 6, 10]);
}

#[test]
fn basis_count_matches_degree_enumeration() {
    for strength in 0..=12 {
        let domain = PrismDomain::new(strength);
        assert_eq!(domain.basis_count(), count_by_nested_loops(strength));
        assert_eq!(domain.basis_count(), prism_basis_degrees(strength).count());
    }
}

#[test]
fn basis_degrees_are_ordered_by_nested_degree() {
    let degrees: Vec<_> = prism_basis_degrees(2).collect();
    assert_eq!(degrees, vec![[0, 0, 0], [0, 0, 2], [0, 1, 0], [0, 2, 0]]);

    let degrees: Vec<_> = prism_basis_degrees(4).collect();
    assert_eq!(degrees.last(), Some(&[2, 2, 0]));
    assert!(degrees.iter().all(|[i, _, k]| i % 2 == 0 && k % 2 == 0));
}

#[test]
fn evaluated_rows_match_basis_count() {
    let points = sample_points();
    for strength in 0..=8 {
        let domain = PrismDomain::new(strength);
        let values = evaluate_basis::<f64, _>(&domain, &points);
        assert_eq!(values.nrows(), domain.basis_count());
        assert_eq!(values.ncols(), points.len());
        assert!(values.iter().all(|v| v.is_finite()));
    }
}

#[test]
#[should_panic]
fn populate_basis_with_wrong_number_of_rows_panics() {
    let domain = PrismDomain::new(3);
    let points = sample_points();
    let mut values = DMatrix::zeros(domain.basis_count() + 1, points.len());
    domain.populate_basis(DMatrixViewMut::from(&mut values), &points[..]);
}

#[test]
fn jacobi_sequence_only_moves_forward() {
    let mut legendre = JacobiSequence::legendre(0.3f64);
    assert_scalar_eq!(legendre.value(3), -0.3825, comp = abs, tol = 1e-15);
    assert_eq!(legendre.degree(), 3);
    // The previous degree is still available
    assert_scalar_eq!(legendre.value(2), -0.365, comp = abs, tol = 1e-15);
    assert_panics!({
        let mut legendre = legendre.clone();
        legendre.value(1)
    });
}

#[test]
fn basis_values_match_closed_forms() {
    let point = Point3::new(-0.6, 0.2, 0.5);
    let values = evaluate_basis::<f64, _>(&PrismDomain::new(2), &[point]);

    // psi_000 = 1 / 2
    assert_scalar_eq!(values[(0, 0)], 0.5, comp = abs, tol = 1e-15);
    // psi_002 = sqrt(5) / 2 P_2(r)
    let p2_r = 0.5 * (3.0 * 0.25 - 1.0);
    assert_scalar_eq!(values[(1, 0)], 0.5 * 5.0f64.sqrt() * p2_r, comp = abs, tol = 1e-15);
    // psi_010 = sqrt(2) / 2 P_1^{(1, 0)}(q)
    let p1_q = 0.5 * (3.0 * 0.2 + 1.0);
    assert_scalar_eq!(values[(2, 0)], 0.5 * 2.0f64.sqrt() * p1_q, comp = abs, tol = 1e-15);
}

#[test]
fn basis_is_orthonormal_on_reference_prism() {
    for strength in 0..=8 {
        let domain = PrismDomain::new(strength);
        let (weights, points) = domain.reference_quadrature::<f64>();
        let gram = basis_gram_matrix(&domain, &weights, &points);
        let n = domain.basis_count();
        assert_matrix_eq!(gram, DMatrix::identity(n, n), comp = abs, tol = 1e-12);
    }
}

#[test]
fn basis_is_well_defined_at_collapsed_vertex() {
    let strength = 6;
    let vertex = Point3::new(-1.0, 1.0, 0.3);
    let nearby = Point3::new(-1.0, 1.0 - 1e-12, 0.3);
    let at_vertex = evaluate_basis::<f64, _>(&PrismDomain::new(strength), &[vertex]);
    let near_vertex = evaluate_basis::<f64, _>(&PrismDomain::new(strength), &[nearby]);

    for (row, [i, _, _]) in prism_basis_degrees(strength).enumerate() {
        assert!(at_vertex[(row, 0)].is_finite());
        if i > 0 {
            assert_eq!(at_vertex[(row, 0)], 0.0);
        }
    }
    assert_matrix_eq!(at_vertex, near_vertex, comp = abs, tol = 1e-9);
}

#[test]
fn basis_can_be_evaluated_in_single_precision() {
    let domain = PrismDomain::new(3);
    let points = [Point3::new(-1.0f32 / 3.0, -1.0 / 3.0, 0.0)];
    let mut values = DMatrix::<f32>::zeros(domain.basis_count(), 1);
    domain.populate_basis(DMatrixViewMut::from(&mut values), &points[..]);
    assert_scalar_eq!(values[(0, 0)], 0.5f32, comp = abs, tol = 1e-7);
}

proptest! {
    #[test]
    fn basis_values_are_finite_in_prism(point in point_in_prism()) {
        let values = evaluate_basis::<f64, _>(&PrismDomain::new(8), &[point]);
        prop_assert!(values.iter().all(|v| v.is_finite()));
    }
}
