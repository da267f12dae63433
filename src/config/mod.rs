//! Configuration: numeric policy and graph build/export options.

pub mod options;
pub mod policy;

pub use options::{BuildFlags, BuildOption, BuildOptions, ExportOptions};
pub use policy::{NumericPolicy, Rejection, DEFAULT_EPSILON};
