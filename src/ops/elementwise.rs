//! Elementwise kernels: add, sub, hadamard, scale.
//!
//! Every kernel allocates a fresh [`Dense`] carrying the numeric policy of its first
//! operand and visits cells in row-major order. When the operands are dense the kernel
//! works on the raw buffers; otherwise it goes through [`Matrix::at`]/[`Matrix::set`].
//! Both paths produce identical cells and report the same first offending cell.

use crate::core::traits::Matrix;
use crate::error::MatrixError;
use crate::matrix::Dense;
use crate::utils::validate;

fn zip_with(
    op: &str,
    a: &dyn Matrix,
    b: &dyn Matrix,
    f: impl Fn(f64, f64) -> f64,
) -> Result<Dense, MatrixError> {
    validate::same_shape(op, a, b)?;
    if let (Some(da), Some(db)) = (a.as_dense(), b.as_dense()) {
        let data = da
            .as_slice()
            .iter()
            .zip(db.as_slice())
            .map(|(&x, &y)| f(x, y))
            .collect();
        return Dense::from_vec_with_policy(a.rows(), a.cols(), data, a.policy());
    }
    let mut out = Dense::with_policy(a.rows(), a.cols(), a.policy())?;
    for i in 0..a.rows() {
        for j in 0..a.cols() {
            out.set(i, j, f(a.at(i, j)?, b.at(i, j)?))?;
        }
    }
    Ok(out)
}

/// `A + B`.
pub fn add(a: &dyn Matrix, b: &dyn Matrix) -> Result<Dense, MatrixError> {
    zip_with("add", a, b, |x, y| x + y)
}

/// `A - B`.
pub fn sub(a: &dyn Matrix, b: &dyn Matrix) -> Result<Dense, MatrixError> {
    zip_with("sub", a, b, |x, y| x - y)
}

/// Elementwise product `A ∘ B`.
pub fn hadamard(a: &dyn Matrix, b: &dyn Matrix) -> Result<Dense, MatrixError> {
    zip_with("hadamard", a, b, |x, y| x * y)
}

/// `alpha · A`.
pub fn scale(a: &dyn Matrix, alpha: f64) -> Result<Dense, MatrixError> {
    if let Some(da) = a.as_dense() {
        let data = da.as_slice().iter().map(|&x| x * alpha).collect();
        return Dense::from_vec_with_policy(a.rows(), a.cols(), data, a.policy());
    }
    let mut out = Dense::with_policy(a.rows(), a.cols(), a.policy())?;
    for i in 0..a.rows() {
        for j in 0..a.cols() {
            out.set(i, j, a.at(i, j)? * alpha)?;
        }
    }
    Ok(out)
}
