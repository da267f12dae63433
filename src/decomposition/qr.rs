//! Householder QR factorization.
//!
//! For an `m x n` matrix `A` this produces an orthogonal `m x m` `Q` and an upper-triangular
//! `m x n` `R` with `Q · R = A`. Column `k` is reduced by the reflector
//! `H = I - 2 v vᵀ / (vᵀ v)` built from the trailing entries `x = R[k.., k]`, always mapping
//! `x` onto `+‖x‖ e₁`. The diagonal of `R` is therefore non-negative for every input; the
//! leading component of `v` is computed with the cancellation-free form when `x₀ > 0`,
//! which changes how `v` is evaluated but not which reflector is applied.
//!
//! # References
//! - Golub & Van Loan, Matrix Computations, §5.1.2 and §5.2.1

use crate::core::traits::Matrix;
use crate::error::MatrixError;
use crate::matrix::Dense;
use crate::utils::validate;

/// Factors of `A = Q R`.
#[derive(Clone, Debug)]
pub struct Qr {
    /// Orthogonal factor, `m x m`.
    pub q: Dense,
    /// Upper-triangular factor, `m x n`.
    pub r: Dense,
}

/// Householder vector `v` and `vᵀv` for `x`, mapping it to `+‖x‖ e₁`. `None` when `x` already is.
fn house(x: &[f64]) -> Option<(Vec<f64>, f64)> {
    let x0 = x[0];
    let sigma: f64 = x[1..].iter().map(|v| v * v).sum();
    let norm = (x0 * x0 + sigma).sqrt();
    if norm == 0.0 || (sigma == 0.0 && x0 >= 0.0) {
        return None;
    }
    let v0 = if x0 <= 0.0 { x0 - norm } else { -sigma / (x0 + norm) };
    let mut v = Vec::with_capacity(x.len());
    v.push(v0);
    v.extend_from_slice(&x[1..]);
    let vtv = v0 * v0 + sigma;
    if vtv == 0.0 {
        return None;
    }
    Some((v, vtv))
}

/// Factor `a` as `Q R`.
pub fn qr(a: &dyn Matrix) -> Result<Qr, MatrixError> {
    validate::finite(a)?;
    let (m, n) = a.shape();
    let policy = a.policy();
    let mut r = Dense::from_matrix(a)?;
    let mut q = Dense::identity_with_policy(m, policy)?;

    for k in 0..m.min(n) {
        let x: Vec<f64> = (k..m).map(|i| r.raw(i, k)).collect();
        let Some((v, vtv)) = house(&x) else { continue };
        let beta = 2.0 / vtv;

        // R <- H R, columns k..n
        for j in k..n {
            let s: f64 = v.iter().enumerate().map(|(t, vt)| vt * r.raw(k + t, j)).sum();
            let f = beta * s;
            for (t, vt) in v.iter().enumerate() {
                let cur = r.raw(k + t, j);
                r.raw_set(k + t, j, cur - f * vt);
            }
        }
        for i in (k + 1)..m {
            r.raw_set(i, k, 0.0);
        }

        // Q <- Q H
        for row in 0..m {
            let s: f64 = v.iter().enumerate().map(|(t, vt)| q.raw(row, k + t) * vt).sum();
            let f = beta * s;
            for (t, vt) in v.iter().enumerate() {
                let cur = q.raw(row, k + t);
                q.raw_set(row, k + t, cur - f * vt);
            }
        }
    }
    q.validate_all()?;
    r.validate_all()?;
    Ok(Qr { q, r })
}
