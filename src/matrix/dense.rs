//! Row-major dense matrix.
//!
//! `Dense` owns a contiguous buffer of `rows * cols` cells plus the [`NumericPolicy`] it
//! was created with. Every write goes through bounds and policy checks; cloning always
//! deep-copies the buffer.

use std::ops::Index;

use crate::config::policy::{NumericPolicy, Rejection};
use crate::core::traits::Matrix;
use crate::error::MatrixError;

#[derive(Clone, Debug, PartialEq)]
pub struct Dense {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
    policy: NumericPolicy,
}

fn cell_count(rows: usize, cols: usize) -> Result<usize, MatrixError> {
    rows.checked_mul(cols).ok_or_else(|| {
        MatrixError::DimensionMismatch(format!("shape {rows}x{cols} overflows usize"))
    })
}

pub(crate) fn rejection_error(row: usize, col: usize, value: f64) -> MatrixError {
    MatrixError::NonFiniteValue { row, col, value }
}

impl Dense {
    /// Zero-filled `rows x cols` matrix with the default policy.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self, MatrixError> {
        Self::with_policy(rows, cols, NumericPolicy::default())
    }

    /// Zero-filled `rows x cols` matrix with an explicit policy.
    pub fn with_policy(rows: usize, cols: usize, policy: NumericPolicy) -> Result<Self, MatrixError> {
        let policy = policy.validated()?;
        let len = cell_count(rows, cols)?;
        Ok(Self { rows, cols, data: vec![0.0; len], policy })
    }

    /// `n x n` identity with the default policy.
    pub fn identity(n: usize) -> Result<Self, MatrixError> {
        Self::identity_with_policy(n, NumericPolicy::default())
    }

    pub fn identity_with_policy(n: usize, policy: NumericPolicy) -> Result<Self, MatrixError> {
        let mut m = Self::with_policy(n, n, policy)?;
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        Ok(m)
    }

    /// Build from a row-major buffer, validating length and every value.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, MatrixError> {
        Self::from_vec_with_policy(rows, cols, data, NumericPolicy::default())
    }

    pub fn from_vec_with_policy(
        rows: usize,
        cols: usize,
        data: Vec<f64>,
        policy: NumericPolicy,
    ) -> Result<Self, MatrixError> {
        let policy = policy.validated()?;
        let len = cell_count(rows, cols)?;
        if data.len() != len {
            return Err(MatrixError::DimensionMismatch(format!(
                "buffer of length {} cannot back a {rows}x{cols} matrix",
                data.len()
            )));
        }
        let m = Self { rows, cols, data, policy };
        m.validate_all()?;
        Ok(m)
    }

    /// Build from a slice of rows; every row must have the same length.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, MatrixError> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(cell_count(nrows, ncols)?);
        for (i, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != ncols {
                return Err(MatrixError::DimensionMismatch(format!(
                    "row {i} has {} columns, expected {ncols}",
                    r.len()
                )));
            }
            data.extend_from_slice(r);
        }
        Self::from_vec(nrows, ncols, data)
    }

    /// Deep copy of any matrix into dense storage, keeping its policy.
    pub fn from_matrix(m: &dyn Matrix) -> Result<Self, MatrixError> {
        if let Some(d) = m.as_dense() {
            return Ok(d.clone());
        }
        let mut out = Self::with_policy(m.rows(), m.cols(), m.policy())?;
        for i in 0..m.rows() {
            for j in 0..m.cols() {
                out.set(i, j, m.at(i, j)?)?;
            }
        }
        Ok(out)
    }

    /// Same contents re-attached to another policy; all cells are re-validated.
    pub fn repolicied(&self, policy: NumericPolicy) -> Result<Self, MatrixError> {
        Self::from_vec_with_policy(self.rows, self.cols, self.data.clone(), policy)
    }

    #[inline]
    fn offset(&self, i: usize, j: usize) -> Result<usize, MatrixError> {
        if i >= self.rows || j >= self.cols {
            return Err(MatrixError::IndexOutOfBounds {
                row: i,
                col: j,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(i * self.cols + j)
    }

    /// Policy check for a value about to land in `(i, j)`.
    #[inline]
    pub(crate) fn admit(&self, i: usize, j: usize, value: f64) -> Result<(), MatrixError> {
        self.policy
            .check(value)
            .map_err(|_: Rejection| rejection_error(i, j, value))
    }

    /// Re-check every cell in row-major order; reports the first offender.
    pub(crate) fn validate_all(&self) -> Result<(), MatrixError> {
        if !self.policy.validate_finiteness {
            return Ok(());
        }
        for (k, &v) in self.data.iter().enumerate() {
            if !self.policy.accepts(v) {
                return Err(rejection_error(k / self.cols, k % self.cols, v));
            }
        }
        Ok(())
    }

    /// Row-major cells.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> Result<&[f64], MatrixError> {
        if i >= self.rows {
            return Err(MatrixError::IndexOutOfBounds { row: i, col: 0, rows: self.rows, cols: self.cols });
        }
        Ok(&self.data[i * self.cols..(i + 1) * self.cols])
    }

    /// Column `j` copied out.
    pub fn col(&self, j: usize) -> Result<Vec<f64>, MatrixError> {
        if j >= self.cols {
            return Err(MatrixError::IndexOutOfBounds { row: 0, col: j, rows: self.rows, cols: self.cols });
        }
        Ok((0..self.rows).map(|i| self.data[i * self.cols + j]).collect())
    }

    /// Unchecked-by-policy read for kernels that already validated the shape.
    #[inline]
    pub(crate) fn raw(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.cols + j]
    }

    /// Unchecked-by-policy write; callers re-validate before handing the matrix out.
    #[inline]
    pub(crate) fn raw_set(&mut self, i: usize, j: usize, value: f64) {
        self.data[i * self.cols + j] = value;
    }

    pub(crate) fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Elementwise `|a - b| <= atol + rtol * |b|`, with equal infinities treated as close.
    pub fn approx_eq(&self, other: &dyn Matrix, rtol: f64, atol: f64) -> bool {
        if self.shape() != other.shape() {
            return false;
        }
        for i in 0..self.rows {
            for j in 0..self.cols {
                let a = self.raw(i, j);
                let Ok(b) = other.at(i, j) else { return false };
                if a == b {
                    continue;
                }
                if !((a - b).abs() <= atol + rtol * b.abs()) {
                    return false;
                }
            }
        }
        true
    }
}

impl Matrix for Dense {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn at(&self, i: usize, j: usize) -> Result<f64, MatrixError> {
        let k = self.offset(i, j)?;
        Ok(self.data[k])
    }

    fn set(&mut self, i: usize, j: usize, value: f64) -> Result<(), MatrixError> {
        let k = self.offset(i, j)?;
        self.admit(i, j, value)?;
        self.data[k] = value;
        Ok(())
    }

    fn clone_matrix(&self) -> Box<dyn Matrix> {
        Box::new(self.clone())
    }

    fn policy(&self) -> NumericPolicy {
        self.policy
    }

    fn as_dense(&self) -> Option<&Dense> {
        Some(self)
    }

    fn as_dense_mut(&mut self) -> Option<&mut Dense> {
        Some(self)
    }
}

/// Panicking read access, mirroring slice indexing. Use [`Matrix::at`] for a checked read.
impl Index<(usize, usize)> for Dense {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        assert!(i < self.rows && j < self.cols, "index ({i}, {j}) out of bounds for {}x{}", self.rows, self.cols);
        &self.data[i * self.cols + j]
    }
}
