//! Property-based tests for ring invariants and matrix algebra
//!
//! These tests use proptest to check the ring invariants after arbitrary
//! mutation sequences and the algebraic identities against dense baselines.

use crossring::{to_dense, RingMatrix};
use proptest::prelude::*;

// ============================================================================
// Test Utilities
// ============================================================================

type Triplets = Vec<(usize, usize, i64)>;

/// Generate a dimension and a list of (possibly duplicate) triples within it
fn matrix_strategy(max_n: usize, max_nnz: usize) -> impl Strategy<Value = (usize, Triplets)> {
    (1..=max_n).prop_flat_map(move |n| {
        (
            Just(n),
            prop::collection::vec((1..=n, 1..=n, -9i64..=9), 0..=max_nnz),
        )
    })
}

/// Generate a dimension and two operands of that dimension
fn pair_strategy(max_n: usize, max_nnz: usize) -> impl Strategy<Value = (usize, Triplets, Triplets)> {
    (1..=max_n).prop_flat_map(move |n| {
        (
            Just(n),
            prop::collection::vec((1..=n, 1..=n, -9i64..=9), 0..=max_nnz),
            prop::collection::vec((1..=n, 1..=n, -9i64..=9), 0..=max_nnz),
        )
    })
}

fn build(n: usize, entries: &Triplets) -> RingMatrix<i64> {
    RingMatrix::from_triplets(n, entries.iter().copied()).unwrap()
}

// ============================================================================
// Ring Invariants
// ============================================================================

proptest! {
    /// Property: any sequence of upserts keeps every ring sorted and zero-free
    #[test]
    fn prop_upserts_keep_invariants((n, ops) in matrix_strategy(6, 40)) {
        let mut m = RingMatrix::<i64>::new(n);
        for (r, c, v) in ops {
            m.upsert(r, c, v).unwrap();
            prop_assert!(m.validate().is_ok());
        }
        for r in 1..=n {
            let cols: Vec<usize> = m.row_iter(r).map(|(c, _)| c).collect();
            prop_assert!(cols.windows(2).all(|w| w[0] < w[1]));
        }
        prop_assert!(m.triplets().all(|(_, _, v)| v != 0));
    }

    /// Property: the last write to a coordinate is what get returns
    #[test]
    fn prop_get_sees_last_upsert((n, ops) in matrix_strategy(5, 30)) {
        let mut m = RingMatrix::<i64>::new(n);
        let mut dense = vec![vec![0i64; n + 1]; n + 1];
        for (r, c, v) in ops {
            m.upsert(r, c, v).unwrap();
            dense[r][c] = v;
            prop_assert_eq!(m.get(r, c).unwrap(), v);
        }
        for r in 1..=n {
            for c in 1..=n {
                prop_assert_eq!(m.get(r, c).unwrap(), dense[r][c]);
            }
        }
    }

    /// Property: removing twice is the same as removing once
    #[test]
    fn prop_remove_idempotent((n, entries) in matrix_strategy(5, 20), r in 1usize..=5, c in 1usize..=5) {
        prop_assume!(r <= n && c <= n);
        let mut m = build(n, &entries);
        m.remove(r, c).unwrap();
        let once = m.clone();
        m.remove(r, c).unwrap();
        prop_assert_eq!(&m, &once);
        prop_assert_eq!(m.get(r, c).unwrap(), 0);
        prop_assert!(m.validate().is_ok());
    }

    /// Property: interleaved inserts and removals leave only the survivors
    #[test]
    fn prop_remove_half((n, entries) in matrix_strategy(6, 30)) {
        let mut m = build(n, &entries);
        let coords: Vec<(usize, usize)> = m.triplets().map(|(r, c, _)| (r, c)).collect();
        for (r, c) in coords.iter().step_by(2) {
            m.remove(*r, *c).unwrap();
        }
        prop_assert!(m.validate().is_ok());
        prop_assert_eq!(m.nnz(), coords.len() / 2);
    }
}

// ============================================================================
// Algebraic Properties
// ============================================================================

proptest! {
    /// Property: A + 0 = A
    #[test]
    fn prop_add_zero((n, entries) in matrix_strategy(6, 25)) {
        let a = build(n, &entries);
        prop_assert_eq!(a.add(&RingMatrix::new(n)).unwrap(), a);
    }

    /// Property: A + B matches the dense sum
    #[test]
    fn prop_add_matches_dense((n, xs, ys) in pair_strategy(6, 25)) {
        let (a, b) = (build(n, &xs), build(n, &ys));
        let c = a.add(&b).unwrap();
        prop_assert_eq!(to_dense(&c), &to_dense(&a) + &to_dense(&b));
        prop_assert!(c.validate().is_ok());
    }

    /// Property: A + (-A) is empty
    #[test]
    fn prop_add_negation_cancels((n, entries) in matrix_strategy(6, 25)) {
        let a = build(n, &entries);
        prop_assert!(a.add(&a.scale(-1).unwrap()).unwrap().is_empty());
    }

    /// Property: scaling by zero stores nothing
    #[test]
    fn prop_scale_zero((n, entries) in matrix_strategy(6, 25)) {
        let a = build(n, &entries);
        let c = a.scale(0).unwrap();
        prop_assert_eq!(c.dim(), n);
        prop_assert_eq!(c.nnz(), 0);
    }

    /// Property: scaling matches the dense product with a scalar
    #[test]
    fn prop_scale_matches_dense((n, entries) in matrix_strategy(6, 25), k in -5i64..=5) {
        let a = build(n, &entries);
        prop_assert_eq!(to_dense(&a.scale(k).unwrap()), to_dense(&a) * k);
    }

    /// Property: transpose is an involution
    #[test]
    fn prop_transpose_involution((n, entries) in matrix_strategy(6, 25)) {
        let a = build(n, &entries);
        let t = a.transpose();
        prop_assert!(t.validate().is_ok());
        prop_assert_eq!(t.transpose(), a);
    }

    /// Property: A × I = A and I × A = A
    #[test]
    fn prop_multiply_identity((n, entries) in matrix_strategy(6, 25)) {
        let a = build(n, &entries);
        let id = RingMatrix::identity(n);
        prop_assert_eq!(a.multiply(&id).unwrap(), a.clone());
        prop_assert_eq!(id.multiply(&a).unwrap(), a);
    }

    /// Property: A × B matches the dense product
    #[test]
    fn prop_multiply_matches_dense((n, xs, ys) in pair_strategy(6, 20)) {
        let (a, b) = (build(n, &xs), build(n, &ys));
        let c = a.multiply(&b).unwrap();
        prop_assert_eq!(to_dense(&c), to_dense(&a).dot(&to_dense(&b)));
        prop_assert!(c.validate().is_ok());
        prop_assert!(c.triplets().all(|(_, _, v)| v != 0));
    }
}
