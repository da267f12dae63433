//! Adjacency matrix builder.
//!
//! For each edge, in the order given:
//! 1. both endpoints are resolved (unknown identifier → [`MatrixError::UnknownVertex`]);
//! 2. a self-loop is dropped when loops are disallowed;
//! 3. when multi-edges are disallowed, only the first edge per key survives, where the key
//!    is `(src, dst)` for directed builds and `{min, max}` for undirected ones;
//! 4. the value (raw weight, or `1` when unweighted) is written at `[src, dst]` and, for
//!    undirected non-loop edges, mirrored to `[dst, src]`.
//!
//! With multi-edges allowed, parallel edges overwrite the same cell, so the last one wins.
//!
//! A weighted build whose surviving edges (after steps 1-3) all weigh exactly `0` degrades
//! to a binary matrix. A single zero-weight edge among non-zero ones is written as `0`,
//! which reads as "no edge".

use std::collections::HashSet;

use tracing::{debug, trace, warn};

use crate::config::options::{BuildFlags, BuildOptions};
use crate::core::traits::Matrix;
use crate::error::MatrixError;
use crate::graph::{Edge, Graph, VertexIndex};
use crate::matrix::Dense;
use crate::shortest_path;

/// A square dense matrix plus the vertex order it was built with.
#[derive(Clone, Debug, PartialEq)]
pub struct AdjacencyMatrix {
    pub(crate) dense: Dense,
    pub(crate) index: VertexIndex,
    pub(crate) options: BuildOptions,
    pub(crate) binary_fallback: bool,
}

/// Dedup key for an edge under the given directedness.
pub(crate) fn edge_key(directed: bool, s: usize, d: usize) -> (usize, usize) {
    if directed { (s, d) } else { (s.min(d), s.max(d)) }
}

/// Build an adjacency matrix from ordered vertices and edges.
pub fn build_adjacency<V: AsRef<str>>(
    vertices: &[V],
    edges: &[Edge],
    options: BuildOptions,
) -> Result<AdjacencyMatrix, MatrixError> {
    let options = options.validated()?;
    let index = VertexIndex::new(vertices)?;
    let n = index.len();
    let directed = options.directed();

    let mut seen = HashSet::new();
    let (mut loops_skipped, mut collapsed) = (0usize, 0usize);
    let mut kept = Vec::with_capacity(edges.len());
    for e in edges {
        let s = index.resolve(&e.from)?;
        let d = index.resolve(&e.to)?;
        if s == d && !options.allow_loops() {
            loops_skipped += 1;
            continue;
        }
        if !options.allow_multi_edges() && !seen.insert(edge_key(directed, s, d)) {
            trace!(from = %e.from, to = %e.to, "dropping parallel edge");
            collapsed += 1;
            continue;
        }
        kept.push((s, d, e));
    }

    let binary_fallback =
        options.weighted() && !kept.is_empty() && kept.iter().all(|(_, _, e)| e.weight == 0.0);
    if binary_fallback {
        warn!(edges = kept.len(), "every edge weight is zero; building a binary adjacency");
    }
    let use_weights = options.weighted() && !binary_fallback;

    let mut dense = Dense::with_policy(n, n, options.policy)?;
    for (s, d, e) in kept {
        let value = if use_weights {
            if !options.policy.accepts(e.weight) {
                return Err(MatrixError::InvalidWeight {
                    from: e.from.clone(),
                    to: e.to.clone(),
                    weight: e.weight,
                });
            }
            e.weight
        } else {
            1.0
        };
        dense.set(s, d, value)?;
        if !directed && s != d {
            dense.set(d, s, value)?;
        }
    }

    if options.metric_closure() {
        shortest_path::metric_closure(&mut dense)?;
    }
    debug!(
        vertices = n,
        edges = edges.len(),
        loops_skipped,
        collapsed,
        directed,
        metric_closure = options.metric_closure(),
        "built adjacency matrix"
    );
    Ok(AdjacencyMatrix { dense, index, options, binary_fallback })
}

impl AdjacencyMatrix {
    /// Build from a [`Graph`], in its stored vertex and edge order.
    pub fn from_graph(graph: &Graph, options: BuildOptions) -> Result<Self, MatrixError> {
        build_adjacency(graph.vertices(), graph.edges(), options)
    }

    pub fn matrix(&self) -> &Dense {
        &self.dense
    }

    pub fn into_matrix(self) -> Dense {
        self.dense
    }

    /// Number of vertices (rows and columns).
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn vertex_index(&self) -> &VertexIndex {
        &self.index
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id)
    }

    pub fn vertex_at(&self, i: usize) -> Option<&str> {
        self.index.id(i)
    }

    /// Options snapshot the matrix was built with.
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// The cell values hold shortest-path distances rather than edge weights.
    pub fn is_metric_closure(&self) -> bool {
        self.options.metric_closure()
    }

    /// A weighted build fell back to binary values because every weight was zero.
    pub fn is_binary_fallback(&self) -> bool {
        self.binary_fallback
    }

    /// Cell for a pair of vertex identifiers.
    pub fn weight(&self, from: &str, to: &str) -> Result<f64, MatrixError> {
        let s = self.index.resolve(from)?;
        let d = self.index.resolve(to)?;
        self.dense.at(s, d)
    }

    fn reject_closure(&self, what: &'static str) -> Result<(), MatrixError> {
        if self.is_metric_closure() {
            return Err(MatrixError::NotImplemented(what));
        }
        Ok(())
    }

    /// Number of non-zero cells per row (out-degree for directed builds).
    /// A self-loop counts once regardless of its weight.
    pub fn degree_vector(&self) -> Result<Vec<f64>, MatrixError> {
        self.reject_closure("degree vector of a metric-closure matrix")?;
        let n = self.len();
        Ok((0..n)
            .map(|i| (0..n).filter(|&j| self.dense.raw(i, j) != 0.0).count() as f64)
            .collect())
    }

    /// Number of non-zero cells per column (in-degree for directed builds).
    pub fn in_degree_vector(&self) -> Result<Vec<f64>, MatrixError> {
        self.reject_closure("in-degree vector of a metric-closure matrix")?;
        let n = self.len();
        Ok((0..n)
            .map(|j| (0..n).filter(|&i| self.dense.raw(i, j) != 0.0).count() as f64)
            .collect())
    }

    /// Overwrite the cells with all-pairs shortest-path distances.
    ///
    /// The matrix is re-created under a policy that admits `+Inf`. Once applied, the
    /// matrix can no longer be exported; applying it again is a no-op.
    pub fn metric_closure(&mut self) -> Result<(), MatrixError> {
        if self.is_metric_closure() {
            return Ok(());
        }
        let policy = self.options.policy.with_positive_infinity(true);
        let mut dist = self.dense.repolicied(policy)?;
        shortest_path::metric_closure(&mut dist)?;
        self.dense = dist;
        self.options.policy = policy;
        self.options.flags.insert(BuildFlags::METRIC_CLOSURE);
        debug!(vertices = self.len(), "applied metric closure");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> Vec<&'static str> {
        vec!["A", "B", "C"]
    }

    #[test]
    fn undirected_mirrors() {
        let edges = [Edge::new("A", "B", 3.0)];
        let adj = build_adjacency(&abc(), &edges, BuildOptions::new().with_weighted(true)).unwrap();
        assert_eq!(adj.weight("A", "B").unwrap(), 3.0);
        assert_eq!(adj.weight("B", "A").unwrap(), 3.0);
    }

    #[test]
    fn directed_does_not_mirror() {
        let edges = [Edge::new("A", "B", 3.0)];
        let opts = BuildOptions::new().with_directed(true).with_weighted(true);
        let adj = build_adjacency(&abc(), &edges, opts).unwrap();
        assert_eq!(adj.weight("A", "B").unwrap(), 3.0);
        assert_eq!(adj.weight("B", "A").unwrap(), 0.0);
    }

    #[test]
    fn unweighted_writes_ones() {
        let edges = [Edge::new("A", "B", 7.5)];
        let adj = build_adjacency(&abc(), &edges, BuildOptions::new()).unwrap();
        assert_eq!(adj.weight("A", "B").unwrap(), 1.0);
    }

    #[test]
    fn loops_skipped_unless_allowed() {
        let edges = [Edge::new("A", "A", 4.0)];
        let adj = build_adjacency(&abc(), &edges, BuildOptions::new()).unwrap();
        assert_eq!(adj.weight("A", "A").unwrap(), 0.0);
        let opts = BuildOptions::new().with_loops(true).with_weighted(true);
        let adj = build_adjacency(&abc(), &edges, opts).unwrap();
        assert_eq!(adj.weight("A", "A").unwrap(), 4.0);
    }

    #[test]
    fn undirected_dedup_uses_unordered_key() {
        let edges = [Edge::new("A", "B", 2.0), Edge::new("B", "A", 5.0)];
        let opts = BuildOptions::new().with_weighted(true).with_multi_edges(false);
        let adj = build_adjacency(&abc(), &edges, opts).unwrap();
        assert_eq!(adj.weight("A", "B").unwrap(), 2.0);
        assert_eq!(adj.weight("B", "A").unwrap(), 2.0);
    }

    #[test]
    fn multi_edges_allowed_last_write_wins() {
        let edges = [Edge::new("A", "B", 2.0), Edge::new("A", "B", 5.0)];
        let opts = BuildOptions::new().with_weighted(true).with_directed(true);
        let adj = build_adjacency(&abc(), &edges, opts).unwrap();
        assert_eq!(adj.weight("A", "B").unwrap(), 5.0);
    }

    #[test]
    fn all_zero_weights_degrade_to_binary() {
        let edges = [Edge::new("A", "B", 0.0), Edge::new("B", "C", 0.0)];
        let adj = build_adjacency(&abc(), &edges, BuildOptions::new().with_weighted(true)).unwrap();
        assert!(adj.is_binary_fallback());
        assert_eq!(adj.weight("A", "B").unwrap(), 1.0);
        assert_eq!(adj.weight("C", "B").unwrap(), 1.0);
    }

    #[test]
    fn single_zero_weight_stays_zero() {
        let edges = [Edge::new("A", "B", 0.0), Edge::new("B", "C", 2.0)];
        let adj = build_adjacency(&abc(), &edges, BuildOptions::new().with_weighted(true)).unwrap();
        assert!(!adj.is_binary_fallback());
        assert_eq!(adj.weight("A", "B").unwrap(), 0.0);
    }

    #[test]
    fn dropped_edges_do_not_block_the_binary_fallback() {
        let edges = [Edge::new("A", "A", 5.0), Edge::new("A", "B", 0.0)];
        let adj = build_adjacency(&abc(), &edges, BuildOptions::new().with_weighted(true)).unwrap();
        assert!(adj.is_binary_fallback());
        assert_eq!(adj.weight("A", "A").unwrap(), 0.0);
        assert_eq!(adj.weight("A", "B").unwrap(), 1.0);

        let edges = [Edge::new("A", "B", 0.0), Edge::new("B", "A", 4.0)];
        let opts = BuildOptions::new().with_weighted(true).with_multi_edges(false);
        let adj = build_adjacency(&abc(), &edges, opts).unwrap();
        assert!(adj.is_binary_fallback());
        assert_eq!(adj.weight("B", "A").unwrap(), 1.0);
    }

    #[test]
    fn unknown_vertex_and_bad_weight() {
        let edges = [Edge::new("A", "Z", 1.0)];
        assert_eq!(
            build_adjacency(&abc(), &edges, BuildOptions::new()).unwrap_err(),
            MatrixError::UnknownVertex("Z".into())
        );
        let edges = [Edge::new("A", "B", f64::NAN)];
        let err = build_adjacency(&abc(), &edges, BuildOptions::new().with_weighted(true)).unwrap_err();
        assert!(matches!(err, MatrixError::InvalidWeight { .. }));
    }

    #[test]
    fn metric_closure_at_build_and_after() {
        let edges = [Edge::new("A", "B", 1.0), Edge::new("B", "C", 1.0)];
        let opts = BuildOptions::new().with_directed(true).with_weighted(true);
        let closed = build_adjacency(&abc(), &edges, opts.with_metric_closure(true)).unwrap();
        assert_eq!(closed.weight("A", "C").unwrap(), 2.0);
        assert_eq!(closed.weight("C", "A").unwrap(), f64::INFINITY);

        let mut later = build_adjacency(&abc(), &edges, opts).unwrap();
        later.metric_closure().unwrap();
        assert!(later.is_metric_closure());
        assert_eq!(later.matrix(), closed.matrix());
        later.metric_closure().unwrap();
        assert_eq!(later.matrix(), closed.matrix());
    }

    #[test]
    fn loop_counts_once_in_degree() {
        let edges = [Edge::new("A", "A", 9.0), Edge::new("A", "B", 2.0)];
        let opts = BuildOptions::new().with_loops(true).with_weighted(true);
        let adj = build_adjacency(&abc(), &edges, opts).unwrap();
        assert_eq!(adj.degree_vector().unwrap(), vec![2.0, 1.0, 0.0]);
        assert_eq!(adj.in_degree_vector().unwrap(), vec![2.0, 1.0, 0.0]);
    }
}
