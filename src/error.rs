use thiserror::Error;

// Unified error type for matgraph

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatrixError {
    #[error("matrix operand is absent")]
    NilMatrix,
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),
    #[error("index ({row}, {col}) out of bounds for {rows}x{cols} matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("unknown vertex {0:?}")]
    UnknownVertex(String),
    #[error("duplicate vertex {0:?}")]
    DuplicateVertex(String),
    #[error("invalid weight {weight} on edge {from:?} -> {to:?}")]
    InvalidWeight { from: String, to: String, weight: f64 },
    #[error("non-finite value {value} rejected at ({row}, {col})")]
    NonFiniteValue { row: usize, col: usize, value: f64 },
    #[error("matrix is not symmetric at ({row}, {col}): |a_ij - a_ji| = {delta}")]
    Asymmetry { row: usize, col: usize, delta: f64 },
    #[error("singular matrix: zero pivot at row {0}")]
    Singular(usize),
    #[error("eigen iteration did not converge after {sweeps} sweeps (off-diagonal mass {off_diagonal})")]
    EigenNotConverged { sweeps: usize, off_diagonal: f64 },
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("invalid option: {0}")]
    InvalidOption(String),
    #[error("edge {from:?} -> {to:?} rejected: {reason}")]
    EdgeRejected {
        from: String,
        to: String,
        reason: &'static str,
    },
}
