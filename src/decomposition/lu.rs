//! LU factorization without pivoting.
//!
//! Decomposes a square `A` into a unit-lower-triangular `L` and an upper-triangular `U`
//! with `L · U = A`, eliminating column by column. A pivot with `|u_kk| <= epsilon`
//! (epsilon taken from `A`'s numeric policy) aborts with [`MatrixError::Singular`].
//! Because rows are never exchanged, the same input and epsilon always give the same
//! factors; matrices that need pivoting (e.g. a zero leading entry) are reported as
//! singular even when they are invertible.
//!
//! # References
//! - Golub & Van Loan, Matrix Computations, §3.2

use tracing::trace;

use crate::core::traits::Matrix;
use crate::error::MatrixError;
use crate::matrix::Dense;
use crate::utils::validate;

/// Factors of `A = L U`.
#[derive(Clone, Debug)]
pub struct Lu {
    /// Unit lower-triangular factor.
    pub l: Dense,
    /// Upper-triangular factor.
    pub u: Dense,
}

/// Factor `a` as `L U` without row exchanges.
pub fn lu(a: &dyn Matrix) -> Result<Lu, MatrixError> {
    validate::square("lu", a)?;
    validate::finite(a)?;
    let n = a.rows();
    let policy = a.policy();
    let mut u = Dense::from_matrix(a)?;
    let mut l = Dense::identity_with_policy(n, policy)?;

    for k in 0..n {
        let pivot = u.raw(k, k);
        if policy.is_zero(pivot) {
            trace!(row = k, pivot, "lu: pivot below epsilon");
            return Err(MatrixError::Singular(k));
        }
        for i in (k + 1)..n {
            let factor = u.raw(i, k) / pivot;
            l.raw_set(i, k, factor);
            u.raw_set(i, k, 0.0);
            for j in (k + 1)..n {
                let v = u.raw(i, j) - factor * u.raw(k, j);
                u.raw_set(i, j, v);
            }
        }
    }
    l.validate_all()?;
    u.validate_all()?;
    Ok(Lu { l, u })
}

impl Lu {
    /// `det(A) = Π u_kk`.
    pub fn determinant(&self) -> f64 {
        (0..self.u.rows()).map(|k| self.u.raw(k, k)).product()
    }

    /// Solve `A x = b` by forward then backward substitution.
    pub fn solve(&self, b: &[f64]) -> Result<Vec<f64>, MatrixError> {
        let n = self.u.rows();
        validate::vector_len("lu solve", &self.u, b.len())?;
        // L y = b (unit diagonal)
        let mut y = b.to_vec();
        for i in 0..n {
            for j in 0..i {
                y[i] -= self.l.raw(i, j) * y[j];
            }
        }
        // U x = y
        let mut x = y;
        for i in (0..n).rev() {
            for j in (i + 1)..n {
                x[i] -= self.u.raw(i, j) * x[j];
            }
            x[i] /= self.u.raw(i, i);
        }
        Ok(x)
    }
}
