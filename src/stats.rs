//! Statistics built from the dense kernels: centering, covariance, correlation.
//!
//! Observations are rows and variables are columns.

use crate::core::traits::Matrix;
use crate::error::MatrixError;
use crate::matrix::Dense;
use crate::ops::{mul, scale, transpose};

/// Subtract each column's mean from that column.
pub fn center_columns(a: &dyn Matrix) -> Result<Dense, MatrixError> {
    let (r, c) = a.shape();
    let mut out = Dense::from_matrix(a)?;
    if r == 0 {
        return Ok(out);
    }
    for j in 0..c {
        let mean = (0..r).map(|i| out.raw(i, j)).sum::<f64>() / r as f64;
        for i in 0..r {
            let v = out.raw(i, j) - mean;
            out.set(i, j, v)?;
        }
    }
    Ok(out)
}

/// Subtract each row's mean from that row.
pub fn center_rows(a: &dyn Matrix) -> Result<Dense, MatrixError> {
    let t = transpose(a)?;
    transpose(&center_columns(&t)?)
}

/// Sample covariance `Xcᵀ Xc / (n - 1)` of the column variables.
pub fn covariance(a: &dyn Matrix) -> Result<Dense, MatrixError> {
    let n = a.rows();
    if n < 2 {
        return Err(MatrixError::DimensionMismatch(format!(
            "covariance: need at least 2 observations, got {n}"
        )));
    }
    let xc = center_columns(a)?;
    let gram = mul(&transpose(&xc)?, &xc)?;
    scale(&gram, 1.0 / (n - 1) as f64)
}

/// Pearson correlation of the column variables.
///
/// Any entry involving a zero-variance column is `0`, including its diagonal.
pub fn correlation(a: &dyn Matrix) -> Result<Dense, MatrixError> {
    let cov = covariance(a)?;
    let p = cov.rows();
    let sd: Vec<f64> = (0..p).map(|k| cov.raw(k, k).sqrt()).collect();
    let mut out = Dense::with_policy(p, p, cov.policy())?;
    for i in 0..p {
        for j in 0..p {
            let denom = sd[i] * sd[j];
            let v = if denom == 0.0 { 0.0 } else { cov.raw(i, j) / denom };
            out.set(i, j, v)?;
        }
    }
    Ok(out)
}
