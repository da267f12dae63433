//! Shared helpers: precondition validators and convergence tracking.

pub mod convergence;
pub mod validate;

pub use convergence::{Convergence, SweepStats};
