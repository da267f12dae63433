//! All-pairs shortest paths (Floyd–Warshall), in place.
//!
//! In distance form `+Inf` means "no path" and the diagonal is `0`. [`to_distance_form`]
//! converts an adjacency encoding (where `0` off the diagonal means "no edge") into that
//! form; [`floyd_warshall`] then relaxes with the fixed `k -> i -> j` nesting:
//!
//! ```text
//! dist[i][j] = min(dist[i][j], dist[i][k] + dist[k][j])
//! ```
//!
//! Both mutate their target and must not run concurrently on the same matrix.

use tracing::debug;

use crate::core::traits::Matrix;
use crate::error::MatrixError;
use crate::utils::validate;

/// Relax `dist` in place. O(n³) time, O(1) extra space.
pub fn floyd_warshall(dist: &mut dyn Matrix) -> Result<(), MatrixError> {
    validate::square("floyd_warshall", dist)?;
    let n = dist.rows();
    debug!(n, "floyd_warshall");
    if let Some(d) = dist.as_dense_mut() {
        let w = d.data_mut();
        for k in 0..n {
            for i in 0..n {
                let dik = w[i * n + k];
                for j in 0..n {
                    let through = dik + w[k * n + j];
                    if through < w[i * n + j] {
                        w[i * n + j] = through;
                    }
                }
            }
        }
        return Ok(());
    }
    for k in 0..n {
        for i in 0..n {
            let dik = dist.at(i, k)?;
            for j in 0..n {
                let through = dik + dist.at(k, j)?;
                if through < dist.at(i, j)? {
                    dist.set(i, j, through)?;
                }
            }
        }
    }
    Ok(())
}

/// Force the diagonal to `0` and every off-diagonal `0` to `+Inf`.
///
/// The target's policy must admit `+Inf`, otherwise the first conversion fails with
/// [`MatrixError::NonFiniteValue`] before anything is written.
pub fn to_distance_form(m: &mut dyn Matrix) -> Result<(), MatrixError> {
    validate::square("to_distance_form", m)?;
    let n = m.rows();
    if n > 1 && !m.policy().accepts(f64::INFINITY) {
        return Err(MatrixError::NonFiniteValue { row: 0, col: 1, value: f64::INFINITY });
    }
    for i in 0..n {
        for j in 0..n {
            if i == j {
                m.set(i, j, 0.0)?;
            } else if m.at(i, j)? == 0.0 {
                m.set(i, j, f64::INFINITY)?;
            }
        }
    }
    Ok(())
}

/// [`to_distance_form`] followed by [`floyd_warshall`].
pub fn metric_closure(m: &mut dyn Matrix) -> Result<(), MatrixError> {
    to_distance_form(m)?;
    floyd_warshall(m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NumericPolicy;
    use crate::matrix::Dense;

    const INF: f64 = f64::INFINITY;

    #[test]
    fn chain_of_two_hops() {
        let mut d = Dense::from_vec_with_policy(
            3,
            3,
            vec![0.0, 1.0, INF, INF, 0.0, 1.0, INF, INF, 0.0],
            NumericPolicy::distances(),
        )
        .unwrap();
        floyd_warshall(&mut d).unwrap();
        assert_eq!(d[(0, 2)], 2.0);
        assert_eq!(d[(2, 0)], INF);
    }

    #[test]
    fn closure_converts_zeros() {
        let mut d = Dense::from_vec_with_policy(
            3,
            3,
            vec![5.0, 4.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
            NumericPolicy::distances(),
        )
        .unwrap();
        metric_closure(&mut d).unwrap();
        assert_eq!(d.as_slice(), &[0.0, 4.0, 5.0, INF, 0.0, 1.0, INF, INF, 0.0]);
    }

    #[test]
    fn closure_requires_infinity_policy() {
        let mut d = Dense::zeros(2, 2).unwrap();
        let before = d.clone();
        assert!(matches!(metric_closure(&mut d), Err(MatrixError::NonFiniteValue { .. })));
        assert_eq!(d, before);
    }

    #[test]
    fn non_square_is_rejected() {
        let mut d = Dense::zeros(2, 3).unwrap();
        assert!(matches!(floyd_warshall(&mut d), Err(MatrixError::DimensionMismatch(_))));
    }
}
