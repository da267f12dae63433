//! Core matrix traits for matgraph.

use std::fmt;

use crate::config::policy::NumericPolicy;
use crate::error::MatrixError;
use crate::matrix::Dense;

/// Capability contract shared by every matrix representation.
///
/// Kernels are written against this trait. A representation that is actually a [`Dense`]
/// reports so through [`Matrix::as_dense`], letting kernels take a contiguous-buffer fast
/// path; the generic path through `at`/`set` must produce identical results.
pub trait Matrix: fmt::Debug {
    /// Number of rows.
    fn rows(&self) -> usize;
    /// Number of columns.
    fn cols(&self) -> usize;
    /// Bounds-checked read.
    fn at(&self, i: usize, j: usize) -> Result<f64, MatrixError>;
    /// Bounds- and policy-checked write.
    fn set(&mut self, i: usize, j: usize, value: f64) -> Result<(), MatrixError>;
    /// Deep copy.
    fn clone_matrix(&self) -> Box<dyn Matrix>;
    /// Numeric policy fixed at construction.
    fn policy(&self) -> NumericPolicy;

    /// Fast-path hook.
    fn as_dense(&self) -> Option<&Dense> {
        None
    }

    /// Mutable fast-path hook.
    fn as_dense_mut(&mut self) -> Option<&mut Dense> {
        None
    }

    /// `(rows, cols)`.
    fn shape(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }
}

/// Matrix–vector product: y ← A x.
pub trait MatVec<V> {
    /// Compute y = A · x.
    fn matvec(&self, x: &V, y: &mut V) -> Result<(), MatrixError>;
}
