//! Build and export options for the graph adapters.
//!
//! Options are resolved once, from defaults plus an ordered list of [`BuildOption`]
//! overrides, into an immutable [`BuildOptions`] snapshot that is passed by value into
//! the builders. Later overrides win over earlier ones.
//!
//! Defaults: undirected, unweighted, multi-edges allowed, loops disallowed, metric closure
//! off, epsilon `1e-9`, finiteness validation on, +Inf disallowed, export threshold `0.0`,
//! export keeps weights.

use bitflags::bitflags;

use crate::config::policy::NumericPolicy;
use crate::error::MatrixError;

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct BuildFlags: u32 {
        const DIRECTED          = 0b0000_0001;
        const WEIGHTED          = 0b0000_0010;
        const ALLOW_MULTI_EDGES = 0b0000_0100;
        const ALLOW_LOOPS       = 0b0000_1000;
        const METRIC_CLOSURE    = 0b0001_0000;
    }
}

/// Knobs consulted only when turning an adjacency matrix back into a graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportOptions {
    /// A cell becomes an edge iff its value is strictly greater than this.
    pub edge_threshold: f64,
    /// Export the raw cell value as weight; otherwise every edge weighs `1`.
    pub keep_weights: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { edge_threshold: 0.0, keep_weights: true }
    }
}

/// A single functional override, applied in order by [`BuildOptions::resolve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BuildOption {
    Directed(bool),
    Weighted(bool),
    AllowMultiEdges(bool),
    AllowLoops(bool),
    MetricClosure(bool),
    Epsilon(f64),
    ValidateFiniteness(bool),
    AllowPositiveInfinity(bool),
    EdgeThreshold(f64),
    KeepWeights(bool),
}

/// Frozen configuration snapshot for one build.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildOptions {
    pub flags: BuildFlags,
    pub policy: NumericPolicy,
    pub export: ExportOptions,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            flags: BuildFlags::ALLOW_MULTI_EDGES,
            policy: NumericPolicy::default(),
            export: ExportOptions::default(),
        }
    }
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults plus `overrides`, applied in order.
    pub fn resolve<I>(overrides: I) -> Result<Self, MatrixError>
    where
        I: IntoIterator<Item = BuildOption>,
    {
        let mut opts = Self::default();
        for o in overrides {
            opts.apply(o);
        }
        opts.validated()
    }

    /// Apply one override in place. Validation happens in [`BuildOptions::validated`].
    pub fn apply(&mut self, option: BuildOption) {
        match option {
            BuildOption::Directed(on) => self.flags.set(BuildFlags::DIRECTED, on),
            BuildOption::Weighted(on) => self.flags.set(BuildFlags::WEIGHTED, on),
            BuildOption::AllowMultiEdges(on) => self.flags.set(BuildFlags::ALLOW_MULTI_EDGES, on),
            BuildOption::AllowLoops(on) => self.flags.set(BuildFlags::ALLOW_LOOPS, on),
            BuildOption::MetricClosure(on) => {
                self.flags.set(BuildFlags::METRIC_CLOSURE, on);
                if on {
                    self.policy.allow_positive_infinity = true;
                }
            }
            BuildOption::Epsilon(eps) => self.policy.epsilon = eps,
            BuildOption::ValidateFiniteness(on) => self.policy.validate_finiteness = on,
            BuildOption::AllowPositiveInfinity(on) => self.policy.allow_positive_infinity = on,
            BuildOption::EdgeThreshold(t) => self.export.edge_threshold = t,
            BuildOption::KeepWeights(on) => self.export.keep_weights = on,
        }
    }

    /// Check the invariants a resolved snapshot must hold.
    pub fn validated(mut self) -> Result<Self, MatrixError> {
        self.policy = self.policy.validated()?;
        if self.export.edge_threshold.is_nan() {
            return Err(MatrixError::InvalidOption("edge threshold is NaN".into()));
        }
        // A closure needs the +Inf sentinel no matter what came after it.
        if self.metric_closure() {
            self.policy.allow_positive_infinity = true;
        }
        Ok(self)
    }

    pub fn with(mut self, option: BuildOption) -> Self {
        self.apply(option);
        self
    }

    pub fn with_directed(self, on: bool) -> Self {
        self.with(BuildOption::Directed(on))
    }

    pub fn with_weighted(self, on: bool) -> Self {
        self.with(BuildOption::Weighted(on))
    }

    pub fn with_multi_edges(self, on: bool) -> Self {
        self.with(BuildOption::AllowMultiEdges(on))
    }

    pub fn with_loops(self, on: bool) -> Self {
        self.with(BuildOption::AllowLoops(on))
    }

    pub fn with_metric_closure(self, on: bool) -> Self {
        self.with(BuildOption::MetricClosure(on))
    }

    pub fn with_epsilon(self, eps: f64) -> Self {
        self.with(BuildOption::Epsilon(eps))
    }

    pub fn with_edge_threshold(self, t: f64) -> Self {
        self.with(BuildOption::EdgeThreshold(t))
    }

    pub fn with_keep_weights(self, on: bool) -> Self {
        self.with(BuildOption::KeepWeights(on))
    }

    pub fn directed(&self) -> bool {
        self.flags.contains(BuildFlags::DIRECTED)
    }

    pub fn weighted(&self) -> bool {
        self.flags.contains(BuildFlags::WEIGHTED)
    }

    pub fn allow_multi_edges(&self) -> bool {
        self.flags.contains(BuildFlags::ALLOW_MULTI_EDGES)
    }

    pub fn allow_loops(&self) -> bool {
        self.flags.contains(BuildFlags::ALLOW_LOOPS)
    }

    pub fn metric_closure(&self) -> bool {
        self.flags.contains(BuildFlags::METRIC_CLOSURE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let o = BuildOptions::default();
        assert!(!o.directed());
        assert!(!o.weighted());
        assert!(o.allow_multi_edges());
        assert!(!o.allow_loops());
        assert!(!o.metric_closure());
        assert_eq!(o.policy.epsilon, 1e-9);
        assert!(o.policy.validate_finiteness);
        assert!(!o.policy.allow_positive_infinity);
        assert_eq!(o.export.edge_threshold, 0.0);
        assert!(o.export.keep_weights);
    }

    #[test]
    fn last_write_wins() {
        let o = BuildOptions::resolve([
            BuildOption::Directed(true),
            BuildOption::Weighted(true),
            BuildOption::Directed(false),
        ])
        .unwrap();
        assert!(!o.directed());
        assert!(o.weighted());
    }

    #[test]
    fn metric_closure_implies_positive_infinity() {
        let o = BuildOptions::resolve([
            BuildOption::MetricClosure(true),
            BuildOption::AllowPositiveInfinity(false),
        ])
        .unwrap();
        assert!(o.policy.allow_positive_infinity);
    }

    #[test]
    fn negative_epsilon_is_rejected() {
        let err = BuildOptions::resolve([BuildOption::Epsilon(-1.0)]).unwrap_err();
        assert!(matches!(err, MatrixError::InvalidOption(_)));
        let err = BuildOptions::resolve([BuildOption::Epsilon(f64::NAN)]).unwrap_err();
        assert!(matches!(err, MatrixError::InvalidOption(_)));
    }
}
