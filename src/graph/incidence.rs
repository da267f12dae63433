//! Signed incidence matrix builder.
//!
//! Shape is `|V| x |E_effective|`, one column per surviving edge in input order. Edges are
//! filtered like the adjacency builder does (unknown endpoints fail, disallowed loops are
//! dropped, parallel edges collapse first-edge-wins when multi-edges are off). Then:
//!
//! | edge                | column pattern                     |
//! |---------------------|------------------------------------|
//! | directed `u -> v`   | `-1` at row `u`, `+1` at row `v`   |
//! | directed self-loop  | column would be all zero; skipped  |
//! | undirected `{u, v}` | `+1` at rows `u` and `v`           |
//! | undirected loop     | `+2` at row `u`                    |

use std::collections::HashSet;

use tracing::debug;

use crate::config::options::BuildOptions;
use crate::core::traits::Matrix;
use crate::error::MatrixError;
use crate::graph::adjacency::edge_key;
use crate::graph::{Edge, Graph, VertexIndex};
use crate::matrix::Dense;

#[derive(Clone, Debug, PartialEq)]
pub struct IncidenceMatrix {
    dense: Dense,
    index: VertexIndex,
    edges: Vec<Edge>,
    options: BuildOptions,
}

pub fn build_incidence<V: AsRef<str>>(
    vertices: &[V],
    edges: &[Edge],
    options: BuildOptions,
) -> Result<IncidenceMatrix, MatrixError> {
    let options = options.validated()?;
    let index = VertexIndex::new(vertices)?;
    let directed = options.directed();

    let mut kept: Vec<(usize, usize, &Edge)> = Vec::with_capacity(edges.len());
    let mut seen = HashSet::new();
    for e in edges {
        let s = index.resolve(&e.from)?;
        let d = index.resolve(&e.to)?;
        if s == d && (!options.allow_loops() || directed) {
            continue;
        }
        if !options.allow_multi_edges() && !seen.insert(edge_key(directed, s, d)) {
            continue;
        }
        kept.push((s, d, e));
    }

    let mut dense = Dense::with_policy(index.len(), kept.len(), options.policy)?;
    for (col, &(s, d, _)) in kept.iter().enumerate() {
        if directed {
            dense.set(s, col, -1.0)?;
            dense.set(d, col, 1.0)?;
        } else if s == d {
            dense.set(s, col, 2.0)?;
        } else {
            dense.set(s, col, 1.0)?;
            dense.set(d, col, 1.0)?;
        }
    }
    debug!(
        vertices = index.len(),
        edges = edges.len(),
        columns = kept.len(),
        directed,
        "built incidence matrix"
    );
    let edges = kept.into_iter().map(|(_, _, e)| e.clone()).collect();
    Ok(IncidenceMatrix { dense, index, edges, options })
}

impl IncidenceMatrix {
    pub fn from_graph(graph: &Graph, options: BuildOptions) -> Result<Self, MatrixError> {
        build_incidence(graph.vertices(), graph.edges(), options)
    }

    pub fn matrix(&self) -> &Dense {
        &self.dense
    }

    pub fn vertex_index(&self) -> &VertexIndex {
        &self.index
    }

    /// Edges aligned one-to-one with columns.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Column count, equal to `edges().len()`.
    pub fn edge_count(&self) -> usize {
        self.dense.cols()
    }
}
