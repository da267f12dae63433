//! Build adjacency matrices for several independent graphs.
//!
//! Builders read no shared mutable state, so with the `rayon` feature the graphs are
//! processed in parallel. Results come back in input order and are identical to building
//! each graph on its own.

use crate::config::options::BuildOptions;
use crate::error::MatrixError;
use crate::graph::adjacency::AdjacencyMatrix;
use crate::graph::Graph;

pub fn build_adjacency_batch(
    graphs: &[Graph],
    options: BuildOptions,
) -> Vec<Result<AdjacencyMatrix, MatrixError>> {
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        graphs
            .par_iter()
            .map(|g| AdjacencyMatrix::from_graph(g, options))
            .collect()
    }
    #[cfg(not(feature = "rayon"))]
    {
        graphs
            .iter()
            .map(|g| AdjacencyMatrix::from_graph(g, options))
            .collect()
    }
}
