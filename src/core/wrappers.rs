//! Wrappers between [`Dense`] and faer dense matrix types, plus vector products.
//!
//! This module lets callers hand matrices to and from `faer` (for example to cross-check
//! results or to feed a faer solver) and implements the [`MatVec`] trait for `Dense`
//! so it can be used with caller-owned output buffers.
//!
//! # References
//! - [faer crate documentation](https://docs.rs/faer)

use faer::{Mat, MatRef};

use crate::config::policy::NumericPolicy;
use crate::core::traits::{MatVec, Matrix};
use crate::error::MatrixError;
use crate::matrix::Dense;

impl Dense {
    /// Copy into a column-major `faer::Mat`.
    pub fn to_faer(&self) -> Mat<f64> {
        Mat::from_fn(self.rows(), self.cols(), |i, j| self.raw(i, j))
    }

    /// Copy a faer matrix into dense storage with the default policy.
    pub fn from_faer(m: MatRef<'_, f64>) -> Result<Self, MatrixError> {
        Self::from_faer_with_policy(m, NumericPolicy::default())
    }

    pub fn from_faer_with_policy(m: MatRef<'_, f64>, policy: NumericPolicy) -> Result<Self, MatrixError> {
        let (rows, cols) = (m.nrows(), m.ncols());
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(m[(i, j)]);
            }
        }
        Self::from_vec_with_policy(rows, cols, data, policy)
    }
}

/// Implements matrix-vector multiplication for `Dense`.
///
/// Computes `y = A * x` where `A` is a dense matrix, `x` and `y` are vectors.
impl MatVec<Vec<f64>> for Dense {
    fn matvec(&self, x: &Vec<f64>, y: &mut Vec<f64>) -> Result<(), MatrixError> {
        if self.cols() != x.len() {
            return Err(MatrixError::DimensionMismatch(format!(
                "matvec: input vector has length {}, matrix has {} columns",
                x.len(),
                self.cols()
            )));
        }
        if self.rows() != y.len() {
            return Err(MatrixError::DimensionMismatch(format!(
                "matvec: output vector has length {}, matrix has {} rows",
                y.len(),
                self.rows()
            )));
        }
        for i in 0..self.rows() {
            y[i] = 0.0;
            for j in 0..self.cols() {
                y[i] += self.raw(i, j) * x[j];
            }
        }
        Ok(())
    }
}
