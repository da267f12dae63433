//! Core abstractions.

pub mod traits;
pub mod wrappers;

pub use traits::{MatVec, Matrix};
