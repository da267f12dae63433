//! Symmetric eigendecomposition by cyclic Jacobi rotations.
//!
//! Each sweep visits the off-diagonal pairs `(p, q)`, `p < q`, in row-major order and
//! applies the rotation that annihilates `a_pq`, accumulating the rotations into the
//! eigenvector matrix. Iteration stops once the sum of squared off-diagonal entries drops
//! below [`Convergence::tol`]; exhausting [`Convergence::max_sweeps`] is an error.
//!
//! The rotation angle follows the stable form
//!
//! ```text
//! θ = (a_qq - a_pp) / (2 a_pq)
//! t = sign(θ) / (|θ| + sqrt(θ² + 1))      (sign(0) = +1)
//! c = 1 / sqrt(t² + 1),  s = t c
//! ```
//!
//! # References
//! - Golub & Van Loan, Matrix Computations, §8.5
//! - Press et al., Numerical Recipes, §11.1

use tracing::{trace, warn};

use crate::core::traits::Matrix;
use crate::error::MatrixError;
use crate::matrix::Dense;
use crate::utils::convergence::{Convergence, SweepStats};
use crate::utils::validate;

/// Eigenpairs of a symmetric matrix.
#[derive(Clone, Debug)]
pub struct Eigen {
    /// Final diagonal of the rotated matrix, in index order.
    pub values: Vec<f64>,
    /// Column `k` is the eigenvector for `values[k]`.
    pub vectors: Dense,
    pub stats: SweepStats,
}

impl Eigen {
    /// Eigenvector `k` as a vector.
    pub fn vector(&self, k: usize) -> Result<Vec<f64>, MatrixError> {
        self.vectors.col(k)
    }

    /// Eigenpairs reordered by ascending eigenvalue; ties keep index order.
    pub fn sorted(&self) -> Result<Eigen, MatrixError> {
        let n = self.values.len();
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| self.values[a].total_cmp(&self.values[b]));
        let mut vectors = Dense::with_policy(n, n, self.vectors.policy())?;
        for (dst, &src) in order.iter().enumerate() {
            for i in 0..n {
                vectors.raw_set(i, dst, self.vectors.raw(i, src));
            }
        }
        Ok(Eigen {
            values: order.iter().map(|&k| self.values[k]).collect(),
            vectors,
            stats: self.stats.clone(),
        })
    }
}

fn off_diagonal(w: &Dense) -> f64 {
    let n = w.rows();
    let mut sum = 0.0;
    for i in 0..n {
        for j in 0..n {
            if i != j {
                let v = w.raw(i, j);
                sum += v * v;
            }
        }
    }
    sum
}

fn rotate(w: &mut Dense, v: &mut Dense, p: usize, q: usize) {
    let n = w.rows();
    let apq = w.raw(p, q);
    if apq == 0.0 {
        return;
    }
    let theta = (w.raw(q, q) - w.raw(p, p)) / (2.0 * apq);
    let sign = if theta >= 0.0 { 1.0 } else { -1.0 };
    let t = sign / (theta.abs() + (theta * theta + 1.0).sqrt());
    let c = 1.0 / (t * t + 1.0).sqrt();
    let s = t * c;

    // W <- W J
    for k in 0..n {
        let (akp, akq) = (w.raw(k, p), w.raw(k, q));
        w.raw_set(k, p, c * akp - s * akq);
        w.raw_set(k, q, s * akp + c * akq);
    }
    // W <- Jᵀ W
    for k in 0..n {
        let (apk, aqk) = (w.raw(p, k), w.raw(q, k));
        w.raw_set(p, k, c * apk - s * aqk);
        w.raw_set(q, k, s * apk + c * aqk);
    }
    w.raw_set(p, q, 0.0);
    w.raw_set(q, p, 0.0);
    // V <- V J
    for k in 0..n {
        let (vkp, vkq) = (v.raw(k, p), v.raw(k, q));
        v.raw_set(k, p, c * vkp - s * vkq);
        v.raw_set(k, q, s * vkp + c * vkq);
    }
}

/// Eigendecomposition with the default [`Convergence`].
pub fn eigen_symmetric(a: &dyn Matrix) -> Result<Eigen, MatrixError> {
    eigen_symmetric_with(a, Convergence::default())
}

/// Eigendecomposition of a symmetric `a` (within its policy epsilon).
pub fn eigen_symmetric_with(a: &dyn Matrix, conv: Convergence) -> Result<Eigen, MatrixError> {
    let policy = a.policy();
    validate::symmetric("eigen", a, policy.epsilon)?;
    validate::finite(a)?;
    let n = a.rows();

    // Work on the exact symmetric part so both triangles stay in lockstep.
    let mut w = Dense::with_policy(n, n, policy)?;
    for i in 0..n {
        for j in 0..n {
            w.raw_set(i, j, 0.5 * (a.at(i, j)? + a.at(j, i)?));
        }
    }
    let mut v = Dense::identity_with_policy(n, policy)?;

    let mut sweeps = 0;
    let stats = loop {
        let off = off_diagonal(&w);
        trace!(sweep = sweeps, off_diagonal = off, "jacobi sweep");
        let (stop, stats) = conv.check(off, sweeps);
        if stop {
            if !stats.converged {
                warn!(sweeps, off_diagonal = off, "jacobi eigensolver did not converge");
                return Err(MatrixError::EigenNotConverged { sweeps, off_diagonal: off });
            }
            break stats;
        }
        for p in 0..n {
            for q in (p + 1)..n {
                rotate(&mut w, &mut v, p, q);
            }
        }
        sweeps += 1;
    };

    let values = (0..n).map(|k| w.raw(k, k)).collect();
    v.validate_all()?;
    Ok(Eigen { values, vectors: v, stats })
}
