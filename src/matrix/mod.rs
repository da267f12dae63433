//! Matrix module: dense storage.

pub mod dense;
pub use dense::Dense;
