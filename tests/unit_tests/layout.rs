use nalgebra::Point3;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use symquad::layout::{OrbitCounts, OrbitInstance, OrbitLayout};
use symquad::prism::PrismDomain;
use symquad::proptest::prism_orbit_counts;
use symquad::Error;
use util::is_in_reference_prism;

#[test]
fn layout_offsets_follow_orbit_order() {
    let domain = PrismDomain::new(4);
    let layout = OrbitLayout::try_new(&domain, [1, 1, 0, 0, 1, 1]).unwrap();

    let expected = vec![
        OrbitInstance { orbit: 0, param_offset: 0, point_offset: 0 },
        OrbitInstance { orbit: 1, param_offset: 0, point_offset: 1 },
        OrbitInstance { orbit: 4, param_offset: 1, point_offset: 3 },
        OrbitInstance { orbit: 5, param_offset: 3, point_offset: 9 },
    ];
    assert_eq!(layout.instances(), expected.as_slice());
    assert_eq!(layout.num_orbits(), 4);
    assert_eq!(layout.num_params(), 6);
    assert_eq!(layout.num_points(), 21);
}

#[test]
fn layout_repeats_orbits_with_multiple_copies() {
    let domain = PrismDomain::new(4);
    let layout = OrbitLayout::try_new(&domain, vec![0, 0, 2, 0, 0, 0]).unwrap();
    let orbits: Vec<_> = layout.instances().iter().map(|i| i.orbit).collect();
    let param_offsets: Vec<_> = layout.instances().iter().map(|i| i.param_offset).collect();
    let point_offsets: Vec<_> = layout.instances().iter().map(|i| i.point_offset).collect();
    assert_eq!(orbits, vec![2, 2]);
    assert_eq!(param_offsets, vec![0, 1]);
    assert_eq!(point_offsets, vec![0, 3]);
}

#[test]
fn layout_rejects_invalid_orbit_counts() {
    let domain = PrismDomain::new(4);
    assert_eq!(
        OrbitLayout::try_new(&domain, [2, 0, 0, 0, 0, 1]),
        Err(Error::InvalidOrbitCombination(vec![2, 0, 0, 0, 0, 1]))
    );
    assert_eq!(
        OrbitLayout::try_new(&domain, [1, 0, 0]),
        Err(Error::OrbitCountMismatch { expected: 6, actual: 3 })
    );
    assert_eq!(
        OrbitLayout::try_new(&domain, [0; 6]),
        Err(Error::EmptyOrbitCombination)
    );
}

#[test]
fn errors_describe_the_problem() {
    let message = Error::InvalidOrbitCombination(vec![2, 0]).to_string();
    assert!(message.contains("[2, 0]"));
    let message = Error::OrbitCountMismatch { expected: 6, actual: 3 }.to_string();
    assert!(message.contains('6') && message.contains('3'));
}

#[test]
fn orbit_counts_totals() {
    let domain = PrismDomain::new(4);
    let counts = OrbitCounts::from([1, 2, 0, 1, 0, 2]);
    let orbits = symquad::prism::PRISM_ORBITS;
    assert_eq!(counts.num_orbits(), 6);
    assert_eq!(counts.num_points(&orbits), 1 + 4 + 6 + 24);
    assert_eq!(counts.num_params(&orbits), 2 + 2 + 6);

    let layout = OrbitLayout::try_new(&domain, counts.clone()).unwrap();
    assert_eq!(layout.counts(), &counts);
    assert_eq!(layout.num_points(), counts.num_points(&orbits));
    assert_eq!(layout.num_params(), counts.num_params(&orbits));
}

#[test]
fn expand_weights_spreads_orbit_weights_over_points() {
    let domain = PrismDomain::new(4);
    let layout = OrbitLayout::try_new(&domain, [1, 1, 1, 0, 0, 0]).unwrap();
    let mut point_weights = vec![0.0; layout.num_points()];
    layout.expand_weights(&[1.0, 2.0, 3.0], &mut point_weights[..]);
    assert_eq!(point_weights, vec![1.0, 2.0, 2.0, 3.0, 3.0, 3.0]);
}

#[test]
#[should_panic]
fn expand_with_wrong_parameter_count_panics() {
    let domain = PrismDomain::new(4);
    let layout = OrbitLayout::try_new(&domain, [0, 1, 1, 0, 0, 0]).unwrap();
    let mut points = vec![Point3::origin(); layout.num_points()];
    layout.expand(&domain, &[0.5f64], &mut points[..]);
}

#[test]
fn to_quadrature_assembles_explicit_rule() {
    let domain = PrismDomain::new(4);
    let layout = OrbitLayout::try_new(&domain, [1, 0, 0, 1, 1, 0]).unwrap();
    let params = [0.2, 0.5, 0.1, 0.3];
    let (weights, points) = layout.to_quadrature(&domain, &params, &[0.5, 0.25, 0.25]);

    assert_eq!(weights.len(), 13);
    assert_eq!(points.len(), 13);
    assert_eq!(weights.iter().sum::<f64>(), 0.5 + 6.0 * 0.25 + 6.0 * 0.25);
    assert!(points.iter().all(|p| is_in_reference_prism(p, 1e-14)));
}

proptest! {
    #[test]
    fn seeded_layouts_are_admissible_and_canonical_on_request(
        counts in prism_orbit_counts(2),
        seed in any::<u64>()
    ) {
        let domain = PrismDomain::new(4);
        let layout = OrbitLayout::try_new(&domain, counts).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let mut params = vec![0.0; layout.num_params()];
        layout.seed(&domain, &mut params[..], &mut rng);

        let mut clamped = params.clone();
        layout.clamp(&domain, &mut clamped[..]);
        prop_assert_eq!(&params, &clamped);

        // Canonicalizing twice changes nothing more than canonicalizing once
        layout.canonicalize(&domain, &mut params[..]);
        let mut twice = params.clone();
        layout.canonicalize(&domain, &mut twice[..]);
        prop_assert_eq!(&params, &twice);

        let mut points = vec![Point3::origin(); layout.num_points()];
        layout.expand(&domain, &params[..], &mut points[..]);
        for point in &points {
            prop_assert!(is_in_reference_prism(point, 1e-14));
        }
    }
}
