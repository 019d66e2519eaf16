//! The solver-oracle boundary.
//!
//! The search treats the solving engine as a black box: it hands over a
//! complete model and gets back either a feasible 0/1 assignment or
//! "infeasible". Nothing in this crate inspects solver internals beyond
//! this contract.

use picklist_core::{Assignment, Model, Result};

/// Outcome of one oracle call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveStatus {
    /// A feasible assignment was found. With the constant-zero objective
    /// every feasible point is optimal.
    Optimal(Assignment),
    /// No feasible point exists for the current model.
    Infeasible,
}

/// Black-box feasibility/optimality engine.
///
/// Implementations must be deterministic for an unchanged model if the
/// search's discovered-solution sequence is to be reproducible. A
/// long-running oracle call blocks the whole search; callers needing
/// bounded latency must impose a timeout behind this boundary.
pub trait SolverOracle {
    /// Solves the model, returning a feasible assignment or infeasibility.
    fn solve(&mut self, model: &Model) -> Result<SolveStatus>;

    /// Oracle name, for logging.
    fn name(&self) -> &str;
}
