//! Adjacency matrix back to a [`Graph`].

use tracing::debug;

use crate::config::options::ExportOptions;
use crate::error::MatrixError;
use crate::graph::adjacency::AdjacencyMatrix;
use crate::graph::{Graph, GraphOptions};

impl AdjacencyMatrix {
    /// Export with the export options recorded at build time.
    pub fn to_graph(&self) -> Result<Graph, MatrixError> {
        self.to_graph_with(self.options.export)
    }

    /// Export with explicit threshold/weight options.
    ///
    /// Vertices are inserted in stored order. Directed matrices visit every ordered pair,
    /// undirected ones only the upper triangle including the diagonal. A cell becomes an
    /// edge iff it is strictly greater than `edge_threshold` and not `+Inf`. Diagonal cells
    /// are skipped when the build disallowed loops.
    pub fn to_graph_with(&self, export: ExportOptions) -> Result<Graph, MatrixError> {
        if self.is_metric_closure() {
            return Err(MatrixError::NotImplemented("export of a metric-closure matrix"));
        }
        if export.edge_threshold.is_nan() {
            return Err(MatrixError::InvalidOption("edge threshold is NaN".into()));
        }
        let directed = self.options.directed();
        let allow_loops = self.options.allow_loops();
        let mut graph = Graph::new(GraphOptions {
            directed,
            weighted: self.options.weighted(),
            allow_loops,
            allow_multi_edges: self.options.allow_multi_edges(),
        });
        for id in self.index.ids() {
            graph.add_vertex(id.as_str());
        }

        let n = self.len();
        let ids = self.index.ids();
        for i in 0..n {
            let start = if directed { 0 } else { i };
            for j in start..n {
                if i == j && !allow_loops {
                    continue;
                }
                let v = self.dense.raw(i, j);
                if v > export.edge_threshold && v != f64::INFINITY {
                    let w = if export.keep_weights { v } else { 1.0 };
                    graph.add_edge(&ids[i], &ids[j], w)?;
                }
            }
        }
        debug!(vertices = n, edges = graph.edges().len(), directed, "exported adjacency to graph");
        Ok(graph)
    }
}
