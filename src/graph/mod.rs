//! Graph ↔ matrix adapter.
//!
//! The graph side is deliberately small: an ordered list of unique vertex identifiers and
//! an ordered list of weighted edges. Builders take that order as the canonical row/column
//! order and never re-sort; callers that want a canonical layout must sort first.
//!
//! - [`adjacency`]: `n x n` adjacency matrices, optional metric closure, degree vectors.
//! - [`incidence`]: `|V| x |E|` signed incidence matrices.
//! - [`export`]: adjacency back to a [`Graph`].
//! - [`batch`]: several independent builds at once.

use std::collections::{HashMap, HashSet};

use crate::error::MatrixError;

pub mod adjacency;
pub mod batch;
pub mod export;
pub mod incidence;

pub use adjacency::{build_adjacency, AdjacencyMatrix};
pub use batch::build_adjacency_batch;
pub use incidence::{build_incidence, IncidenceMatrix};

/// A weighted edge between two vertex identifiers.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub weight: f64,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, weight: f64) -> Self {
        Self { from: from.into(), to: to.into(), weight }
    }

    /// Edge of weight `1`.
    pub fn unit(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::new(from, to, 1.0)
    }

    pub fn is_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Structural switches of a [`Graph`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GraphOptions {
    pub directed: bool,
    pub weighted: bool,
    pub allow_loops: bool,
    pub allow_multi_edges: bool,
}

/// Bidirectional mapping between vertex identifiers and row/column indices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VertexIndex {
    index: HashMap<String, usize>,
    reverse: Vec<String>,
}

impl VertexIndex {
    /// Index the identifiers in the given order; duplicates are an error.
    pub fn new<V: AsRef<str>>(vertices: &[V]) -> Result<Self, MatrixError> {
        let mut index = HashMap::with_capacity(vertices.len());
        let mut reverse = Vec::with_capacity(vertices.len());
        for v in vertices {
            let id = v.as_ref();
            if index.insert(id.to_owned(), reverse.len()).is_some() {
                return Err(MatrixError::DuplicateVertex(id.to_owned()));
            }
            reverse.push(id.to_owned());
        }
        Ok(Self { index, reverse })
    }

    pub fn len(&self) -> usize {
        self.reverse.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reverse.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Like [`VertexIndex::get`], but an unknown identifier is an error.
    pub fn resolve(&self, id: &str) -> Result<usize, MatrixError> {
        self.get(id).ok_or_else(|| MatrixError::UnknownVertex(id.to_owned()))
    }

    pub fn id(&self, i: usize) -> Option<&str> {
        self.reverse.get(i).map(String::as_str)
    }

    /// Identifiers in index order.
    pub fn ids(&self) -> &[String] {
        &self.reverse
    }
}

/// Minimal ordered graph used as builder input and export output.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    options: GraphOptions,
    vertices: Vec<String>,
    lookup: HashSet<String>,
    edges: Vec<Edge>,
    pairs: HashSet<(String, String)>,
}

impl Graph {
    pub fn new(options: GraphOptions) -> Self {
        Self { options, ..Self::default() }
    }

    pub fn options(&self) -> GraphOptions {
        self.options
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> &[String] {
        &self.vertices
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn has_vertex(&self, id: &str) -> bool {
        self.lookup.contains(id)
    }

    /// Insert a vertex; returns `false` if it already existed.
    pub fn add_vertex(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if !self.lookup.insert(id.clone()) {
            return false;
        }
        self.vertices.push(id);
        true
    }

    fn pair_key(&self, from: &str, to: &str) -> (String, String) {
        if self.options.directed || from <= to {
            (from.to_owned(), to.to_owned())
        } else {
            (to.to_owned(), from.to_owned())
        }
    }

    /// Append an edge between two existing vertices.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: f64) -> Result<(), MatrixError> {
        for id in [from, to] {
            if !self.has_vertex(id) {
                return Err(MatrixError::UnknownVertex(id.to_owned()));
            }
        }
        let rejected = |reason| MatrixError::EdgeRejected {
            from: from.to_owned(),
            to: to.to_owned(),
            reason,
        };
        if from == to && !self.options.allow_loops {
            return Err(rejected("self-loops are not allowed"));
        }
        let key = self.pair_key(from, to);
        if !self.options.allow_multi_edges && self.pairs.contains(&key) {
            return Err(rejected("parallel edges are not allowed"));
        }
        self.pairs.insert(key);
        self.edges.push(Edge::new(from, to, weight));
        Ok(())
    }
}
