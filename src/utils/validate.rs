//! Structural and numeric preconditions shared by every public operation.
//!
//! Each validator either returns `Ok(())` or the typed error describing the first
//! violated precondition. Kernels call them before touching any output so that a pure
//! kernel never produces a partially written result.

use crate::core::traits::Matrix;
use crate::error::MatrixError;

/// Turn an optional operand into a present one or `NilMatrix`.
pub fn present<'a>(m: Option<&'a dyn Matrix>) -> Result<&'a dyn Matrix, MatrixError> {
    m.ok_or(MatrixError::NilMatrix)
}

/// Both operands must have identical shape.
pub fn same_shape(op: &str, a: &dyn Matrix, b: &dyn Matrix) -> Result<(), MatrixError> {
    if a.shape() != b.shape() {
        return Err(MatrixError::DimensionMismatch(format!(
            "{op}: {}x{} vs {}x{}",
            a.rows(),
            a.cols(),
            b.rows(),
            b.cols()
        )));
    }
    Ok(())
}

/// `a.cols == b.rows`.
pub fn conformable(op: &str, a: &dyn Matrix, b: &dyn Matrix) -> Result<(), MatrixError> {
    if a.cols() != b.rows() {
        return Err(MatrixError::DimensionMismatch(format!(
            "{op}: inner dimensions {}x{} * {}x{} disagree",
            a.rows(),
            a.cols(),
            b.rows(),
            b.cols()
        )));
    }
    Ok(())
}

pub fn square(op: &str, a: &dyn Matrix) -> Result<(), MatrixError> {
    if !a.is_square() {
        return Err(MatrixError::DimensionMismatch(format!(
            "{op}: expected a square matrix, got {}x{}",
            a.rows(),
            a.cols()
        )));
    }
    Ok(())
}

/// Vector length must equal the matrix column count.
pub fn vector_len(op: &str, a: &dyn Matrix, len: usize) -> Result<(), MatrixError> {
    if a.cols() != len {
        return Err(MatrixError::DimensionMismatch(format!(
            "{op}: vector of length {len} against {} columns",
            a.cols()
        )));
    }
    Ok(())
}

/// Square and `|a_ij - a_ji| <= epsilon` for every pair, scanning the upper triangle row by row.
pub fn symmetric(op: &str, a: &dyn Matrix, epsilon: f64) -> Result<(), MatrixError> {
    square(op, a)?;
    let n = a.rows();
    for i in 0..n {
        for j in (i + 1)..n {
            let delta = (a.at(i, j)? - a.at(j, i)?).abs();
            if !(delta <= epsilon) {
                return Err(MatrixError::Asymmetry { row: i, col: j, delta });
            }
        }
    }
    Ok(())
}

/// Every cell is a finite number.
pub fn finite(a: &dyn Matrix) -> Result<(), MatrixError> {
    for i in 0..a.rows() {
        for j in 0..a.cols() {
            let v = a.at(i, j)?;
            if !v.is_finite() {
                return Err(MatrixError::NonFiniteValue { row: i, col: j, value: v });
            }
        }
    }
    Ok(())
}
