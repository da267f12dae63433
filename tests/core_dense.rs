//! Tests for the dense kernels: products, transpose, elementwise ops and Floyd–Warshall.
//!
//! Every kernel has a buffer fast path for `Dense` and a generic path through the `Matrix`
//! trait. These tests run both on the same random inputs and require identical results,
//! and check the algebraic identities the kernels must satisfy.

use approx::assert_abs_diff_eq;
use matgraph::core::traits::{MatVec, Matrix};
use matgraph::config::NumericPolicy;
use matgraph::error::MatrixError;
use matgraph::matrix::Dense;
use matgraph::ops;
use matgraph::shortest_path::{floyd_warshall, metric_closure};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A matrix that only exposes the capability trait, forcing the generic kernel path.
#[derive(Debug, Clone)]
struct Opaque(Dense);

impl Matrix for Opaque {
    fn rows(&self) -> usize {
        self.0.rows()
    }
    fn cols(&self) -> usize {
        self.0.cols()
    }
    fn at(&self, i: usize, j: usize) -> Result<f64, MatrixError> {
        self.0.at(i, j)
    }
    fn set(&mut self, i: usize, j: usize, value: f64) -> Result<(), MatrixError> {
        self.0.set(i, j, value)
    }
    fn clone_matrix(&self) -> Box<dyn Matrix> {
        Box::new(self.clone())
    }
    fn policy(&self) -> NumericPolicy {
        self.0.policy()
    }
}

fn random(rng: &mut StdRng, r: usize, c: usize) -> Dense {
    let data = (0..r * c).map(|_| rng.gen_range(-1.0..1.0)).collect();
    Dense::from_vec(r, c, data).unwrap()
}

/// Random distance matrix: zero diagonal, roughly a third of the other cells unreachable.
fn random_distances(rng: &mut StdRng, n: usize) -> Dense {
    let data = (0..n * n)
        .map(|k| match (k / n == k % n, rng.gen_range(0..3)) {
            (true, _) => 0.0,
            (false, 0) => f64::INFINITY,
            _ => rng.gen_range(1..20) as f64,
        })
        .collect();
    Dense::from_vec_with_policy(n, n, data, NumericPolicy::distances()).unwrap()
}

/// `ops::matvec`, `MatVec::matvec` and a hand-rolled row sum agree on a 5x5 input.
#[test]
fn matvec_random_small() {
    let n = 5;
    let mut rng = StdRng::seed_from_u64(7);
    let a = random(&mut rng, n, n);
    let x: Vec<f64> = (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect();
    let y = ops::matvec(&a, &x).unwrap();

    let mut y_buf = vec![0.0; n];
    a.matvec(&x, &mut y_buf).unwrap();

    for i in 0..n {
        let expected = (0..n).map(|j| a[(i, j)] * x[j]).sum::<f64>();
        assert_abs_diff_eq!(y[i], expected, epsilon = 1e-12);
        assert_eq!(y[i], y_buf[i]);
    }
}

/// Every kernel returns bit-identical results on `Dense` and on the trait-only wrapper.
#[test]
fn fast_and_generic_paths_agree() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..20 {
        let (m, n, p) = (rng.gen_range(1..6), rng.gen_range(1..6), rng.gen_range(1..6));
        let a = random(&mut rng, m, n);
        let b = random(&mut rng, m, n);
        let c = random(&mut rng, n, p);
        let (oa, ob, oc) = (Opaque(a.clone()), Opaque(b.clone()), Opaque(c.clone()));

        assert_eq!(ops::add(&a, &b).unwrap(), ops::add(&oa, &ob).unwrap());
        assert_eq!(ops::sub(&a, &b).unwrap(), ops::sub(&oa, &ob).unwrap());
        assert_eq!(ops::hadamard(&a, &b).unwrap(), ops::hadamard(&oa, &ob).unwrap());
        assert_eq!(ops::scale(&a, 2.5).unwrap(), ops::scale(&oa, 2.5).unwrap());
        assert_eq!(ops::transpose(&a).unwrap(), ops::transpose(&oa).unwrap());
        assert_eq!(ops::mul(&a, &c).unwrap(), ops::mul(&oa, &oc).unwrap());
        let x: Vec<f64> = (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect();
        assert_eq!(ops::matvec(&a, &x).unwrap(), ops::matvec(&oa, &x).unwrap());
    }
}

/// An overflow to `+Inf` is refused at the same cell on both paths.
#[test]
fn both_paths_report_the_same_rejected_cell() {
    let a = Dense::from_rows(&[[1.0, f64::MAX], [f64::MAX, 1.0]]).unwrap();
    let fast = ops::add(&a, &a).unwrap_err();
    let slow = ops::add(&Opaque(a.clone()), &Opaque(a)).unwrap_err();
    assert_eq!(fast, slow);
    assert!(matches!(fast, MatrixError::NonFiniteValue { row: 0, col: 1, .. }));
}

/// `(Aᵀ)ᵀ == A`, including the empty matrix.
#[test]
fn transpose_is_an_involution() {
    let mut rng = StdRng::seed_from_u64(3);
    for n in 0..6 {
        let a = random(&mut rng, n, n);
        let tt = ops::transpose(&ops::transpose(&a).unwrap()).unwrap();
        assert_eq!(tt, a);
    }
}

/// `A I == A` exactly, with no rounding.
#[test]
fn right_identity_is_exact() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..10 {
        let (m, n) = (rng.gen_range(1..7), rng.gen_range(1..7));
        let a = random(&mut rng, m, n);
        let i = Dense::identity(n).unwrap();
        assert_eq!(ops::mul(&a, &i).unwrap(), a);
    }
}

/// `(AB)C` and `A(BC)` agree to within 1e-9; exact equality is not expected.
#[test]
fn multiplication_is_associative_within_tolerance() {
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..10 {
        let (m, n, p, q) = (
            rng.gen_range(1..6),
            rng.gen_range(1..6),
            rng.gen_range(1..6),
            rng.gen_range(1..6),
        );
        let a = random(&mut rng, m, n);
        let b = random(&mut rng, n, p);
        let c = random(&mut rng, p, q);
        let left = ops::mul(&ops::mul(&a, &b).unwrap(), &c).unwrap();
        let right = ops::mul(&a, &ops::mul(&b, &c).unwrap()).unwrap();
        assert!(left.approx_eq(&right, 1e-9, 1e-9));
    }
}

/// Cross-check of the product kernel against faer.
#[test]
fn mul_matches_faer() {
    let mut rng = StdRng::seed_from_u64(17);
    let a = random(&mut rng, 6, 4);
    let b = random(&mut rng, 4, 5);
    let ours = ops::mul(&a, &b).unwrap();
    let theirs = &a.to_faer() * &b.to_faer();
    let theirs = Dense::from_faer(theirs.as_ref()).unwrap();
    assert!(ours.approx_eq(&theirs, 1e-12, 1e-12));
}

/// Floyd–Warshall on the buffer and through `at`/`set` reaches identical distances.
#[test]
fn floyd_warshall_paths_agree() {
    let mut rng = StdRng::seed_from_u64(19);
    for n in 0..8 {
        let mut fast = random_distances(&mut rng, n);
        let mut slow = Opaque(fast.clone());
        floyd_warshall(&mut fast).unwrap();
        floyd_warshall(&mut slow).unwrap();
        assert_eq!(fast, slow.0);
        for i in 0..n {
            assert_eq!(fast[(i, i)], 0.0);
        }
    }
}

/// Metric closure of an adjacency encoding matches across paths, zeros becoming `+Inf`.
#[test]
fn metric_closure_paths_agree() {
    let mut rng = StdRng::seed_from_u64(23);
    for n in 1..8 {
        let data = (0..n * n)
            .map(|_| if rng.gen_bool(0.4) { rng.gen_range(1..10) as f64 } else { 0.0 })
            .collect();
        let mut fast = Dense::from_vec_with_policy(n, n, data, NumericPolicy::distances()).unwrap();
        let mut slow = Opaque(fast.clone());
        metric_closure(&mut fast).unwrap();
        metric_closure(&mut slow).unwrap();
        assert_eq!(fast, slow.0);
    }

    let mut finite = Opaque(Dense::from_rows(&[[0.0, 1.0], [0.0, 0.0]]).unwrap());
    assert!(matches!(metric_closure(&mut finite), Err(MatrixError::NonFiniteValue { .. })));
    assert_eq!(finite.0.as_slice(), &[0.0, 1.0, 0.0, 0.0]);
}
