//! matgraph: deterministic dense matrices and graph ↔ matrix adapters
//!
//! This crate provides a row-major dense matrix with an explicit numeric policy, a fixed-order
//! kernel set (elementwise ops, products, transpose), LU/QR/symmetric-eigen decompositions,
//! Floyd–Warshall shortest paths, and builders that turn ordered vertex and edge lists into
//! adjacency or incidence matrices (and adjacency matrices back into graphs). Identical inputs
//! always produce bit-identical outputs.

pub mod config;
pub mod core;
pub mod decomposition;
pub mod error;
pub mod graph;
pub mod matrix;
pub mod ops;
pub mod shortest_path;
pub mod stats;
pub mod utils;

// Re-exports for convenience
pub use config::*;
pub use crate::core::*;
pub use decomposition::*;
pub use error::*;
pub use graph::*;
pub use matrix::*;
pub use ops::*;
pub use shortest_path::{floyd_warshall, metric_closure, to_distance_form};
pub use utils::*;
