//! Property tests for the numerical core.

use percolate_synth::generator::{
    independent_vector_set, orthogonal_vector, score_vector, SolverConfig,
};
use percolate_synth::linalg::{dot, dot_to_score, norm_squared};
use percolate_synth::random::{normalized_vector, seeded_rng};
use percolate_synth::SynthError;
use proptest::prelude::*;

const EPS: f64 = 1e-9;

proptest! {
    /// Property: random vectors have the requested length and components in [-1, 1)
    #[test]
    fn prop_vector_length_and_range(seed in any::<u64>(), dim in 1usize..256) {
        let v = normalized_vector(&mut seeded_rng(seed), dim).unwrap();

        prop_assert_eq!(v.len(), dim);
        for x in &v {
            prop_assert!((-1.0..1.0).contains(x));
        }
    }

    /// Property: the result is orthogonal to a single nonzero basis vector
    #[test]
    fn prop_orthogonal_to_basis(seed in any::<u64>(), dim in 1usize..64) {
        let mut rng = seeded_rng(seed);
        let b = normalized_vector(&mut rng, dim).unwrap();
        prop_assume!(norm_squared(&b) > 0.0);

        let v = orthogonal_vector(&mut rng, dim, &[b.clone()]).unwrap();
        let scale = norm_squared(&b).sqrt() * norm_squared(&v).sqrt().max(1.0);
        prop_assert!(dot(&v, &b).unwrap().abs() < EPS * scale);
    }

    /// Property: independent sets with N <= D are pairwise orthogonal
    #[test]
    fn prop_independent_set_pairwise_orthogonal(
        seed in any::<u64>(),
        (dim, count) in (1usize..24).prop_flat_map(|d| (Just(d), 0..=d)),
    ) {
        let set = independent_vector_set(&mut seeded_rng(seed), count, dim).unwrap();
        prop_assert_eq!(set.len(), count);

        for i in 0..set.len() {
            for j in (i + 1)..set.len() {
                prop_assert!(dot(&set[i], &set[j]).unwrap().abs() < EPS);
            }
        }
    }

    /// Property: N = D + 1 always fails
    #[test]
    fn prop_independent_set_overflow(seed in any::<u64>(), dim in 1usize..32) {
        let err = independent_vector_set(&mut seeded_rng(seed), dim + 1, dim).unwrap_err();
        let is_overflow = matches!(err, SynthError::BasisOverflow { .. });
        prop_assert!(is_overflow);
    }

    /// Property: the solved document hits 2S - 1 and the implied score round-trips
    #[test]
    fn prop_score_vector_round_trip(
        seed in any::<u64>(),
        score in 0.0f64..=1.0,
        dim in 2usize..64,
    ) {
        let mut rng = seeded_rng(seed);
        let query = normalized_vector(&mut rng, dim).unwrap();
        // Keep the divisor away from zero so the solved component stays O(1)
        prop_assume!(query[dim - 1].abs() > 1e-3);

        let mut basis = normalized_vector(&mut rng, dim - 1).unwrap();
        basis.push(0.0);

        let b = score_vector(&mut rng, score, &query, basis, &SolverConfig::default()).unwrap();
        let d = dot(&query, &b).unwrap();

        prop_assert!((d - (2.0 * score - 1.0)).abs() < EPS);
        prop_assert!((dot_to_score(d) - score).abs() < EPS);
    }
}

#[test]
fn test_reference_scenario() {
    let q = vec![-0.5, 0.24, 0.71];
    let b = score_vector(
        &mut seeded_rng(1),
        0.80,
        &q,
        vec![0.0, 0.0, 0.0],
        &SolverConfig::default(),
    )
    .unwrap();

    assert!((b[2] - 0.8451).abs() < 1e-4);
    assert!((dot(&q, &b).unwrap() - 0.5999).abs() < 1e-3);
}

#[test]
fn test_degenerate_query() {
    let err = score_vector(
        &mut seeded_rng(1),
        0.80,
        &[-0.5, 0.24, 0.0],
        vec![0.1, 0.2, 0.0],
        &SolverConfig::default(),
    )
    .unwrap_err();

    assert!(matches!(err, SynthError::DegenerateInput(_)));
}

#[test]
fn test_zero_basis_vector() {
    let basis = vec![vec![-0.5, 0.24, 0.71], vec![0.0, 0.0, 0.0]];
    let err = orthogonal_vector(&mut seeded_rng(1), 3, &basis[1..]).unwrap_err();
    assert!(matches!(err, SynthError::DegenerateInput(_)));
}
