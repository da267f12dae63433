//! Direct dense decompositions: LU (no pivoting), Householder QR, symmetric Jacobi eigen.

pub mod eigen;
pub mod lu;
pub mod qr;

pub use eigen::{eigen_symmetric, eigen_symmetric_with, Eigen};
pub use lu::{lu, Lu};
pub use qr::{qr, Qr};
