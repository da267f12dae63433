//! Products and transposition: `mul`, `matvec`, `transpose`.

use crate::core::traits::Matrix;
use crate::error::MatrixError;
use crate::matrix::Dense;
use crate::utils::validate;

/// New `cols x rows` matrix; the input is never touched.
pub fn transpose(a: &dyn Matrix) -> Result<Dense, MatrixError> {
    let (r, c) = a.shape();
    let mut out = Dense::with_policy(c, r, a.policy())?;
    if let Some(da) = a.as_dense() {
        for i in 0..r {
            for j in 0..c {
                out.raw_set(j, i, da.raw(i, j));
            }
        }
        return Ok(out);
    }
    for i in 0..r {
        for j in 0..c {
            out.set(j, i, a.at(i, j)?)?;
        }
    }
    Ok(out)
}

/// `y = A x`; `x.len()` must equal `A.cols`.
pub fn matvec(a: &dyn Matrix, x: &[f64]) -> Result<Vec<f64>, MatrixError> {
    validate::vector_len("matvec", a, x.len())?;
    let mut y = vec![0.0; a.rows()];
    if let Some(da) = a.as_dense() {
        for (i, yi) in y.iter_mut().enumerate() {
            let row = &da.as_slice()[i * da.cols()..(i + 1) * da.cols()];
            for (aij, xj) in row.iter().zip(x) {
                *yi += aij * xj;
            }
        }
        return Ok(y);
    }
    for (i, yi) in y.iter_mut().enumerate() {
        for (j, xj) in x.iter().enumerate() {
            *yi += a.at(i, j)? * xj;
        }
    }
    Ok(y)
}

/// `C = A B` with the fixed `i -> k -> j` loop order.
pub fn mul(a: &dyn Matrix, b: &dyn Matrix) -> Result<Dense, MatrixError> {
    validate::conformable("mul", a, b)?;
    let (m, n, p) = (a.rows(), a.cols(), b.cols());
    if let (Some(da), Some(db)) = (a.as_dense(), b.as_dense()) {
        let mut c = vec![0.0; m * p];
        let (av, bv) = (da.as_slice(), db.as_slice());
        for i in 0..m {
            let crow = &mut c[i * p..(i + 1) * p];
            for k in 0..n {
                let aik = av[i * n + k];
                let brow = &bv[k * p..(k + 1) * p];
                for (cij, bkj) in crow.iter_mut().zip(brow) {
                    *cij += aik * bkj;
                }
            }
        }
        return Dense::from_vec_with_policy(m, p, c, a.policy());
    }
    // Accumulate in a scratch buffer so intermediate sums are not policy-checked.
    let mut c = vec![0.0; m * p];
    for i in 0..m {
        for k in 0..n {
            let aik = a.at(i, k)?;
            for j in 0..p {
                c[i * p + j] += aik * b.at(k, j)?;
            }
        }
    }
    Dense::from_vec_with_policy(m, p, c, a.policy())
}
