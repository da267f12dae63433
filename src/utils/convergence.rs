//! Convergence tracking & tolerance checks for the Jacobi eigensolver.

/// Stopping criteria.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Convergence {
    /// Stop once the sum of squared off-diagonal entries is below this.
    pub tol: f64,
    /// Maximum number of full cyclic sweeps.
    pub max_sweeps: usize,
}

impl Default for Convergence {
    fn default() -> Self {
        Self { tol: 1e-18, max_sweeps: 100 }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SweepStats {
    pub sweeps: usize,
    pub off_diagonal: f64,
    pub converged: bool,
}

impl Convergence {
    pub fn new(tol: f64, max_sweeps: usize) -> Self {
        Self { tol, max_sweeps }
    }

    /// Returns (should_stop, stats) given the current off-diagonal mass after `sweeps` sweeps.
    pub fn check(&self, off_diagonal: f64, sweeps: usize) -> (bool, SweepStats) {
        let converged = off_diagonal < self.tol;
        let stop = converged || sweeps >= self.max_sweeps;
        (stop, SweepStats { sweeps, off_diagonal, converged })
    }
}
