//! Dense kernels over the [`Matrix`](crate::core::Matrix) contract.

pub mod elementwise;
pub mod product;

pub use elementwise::{add, hadamard, scale, sub};
pub use product::{matvec, mul, transpose};
