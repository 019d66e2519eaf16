//! Alternative-solution search.
//!
//! A generate-and-test loop over {Solve, Validate, Accept&Reinforce, Stop}:
//! solve the current model, independently validate the raw assignment,
//! persist the accepted solution, then append an exclusion constraint
//! forbidding that exact cylinder set and solve again. Strictly sequential —
//! each iteration's model depends on the exclusion added by the previous
//! one.
//!
//! Logging levels:
//! - **INFO**: search start/end, accepted solutions
//! - **DEBUG**: per-iteration solve outcomes, validator rejection reasons

use picklist_config::{SearchConfig, DEFAULT_MAX_SOLUTIONS, DEFAULT_PRECISION};
use picklist_core::{build_model, Inventory, Result, SelectionTargets, VarId};
use tracing::{debug, info};

use crate::oracle::{SolveStatus, SolverOracle};
use crate::store::SolutionStore;
use crate::validator::{AcceptedSolution, SolutionValidator};

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The counter passed the cap after one extra solve.
    CapReached,
    /// The oracle reported no feasible point — "no more solutions".
    Infeasible,
    /// The validator rejected the oracle's assignment; the search stops
    /// rather than patching around an invalid optimum.
    Rejected,
    /// A prior run already wrote the sentinel index; nothing to do.
    AlreadyComplete,
}

/// Result of one search run.
#[derive(Debug)]
pub struct SearchOutcome {
    /// Accepted solutions, in discovery order.
    pub solutions: Vec<AcceptedSolution>,
    /// Terminal condition.
    pub stop: StopReason,
}

impl SearchOutcome {
    /// Number of accepted solutions.
    pub fn accepted(&self) -> usize {
        self.solutions.len()
    }
}

/// Repeatedly re-solves the model under accumulated exclusion constraints to
/// surface structurally distinct feasible selections.
///
/// # Example
///
/// ```
/// use picklist_core::{InputRow, Inventory, SelectionTargets};
/// use picklist_solver::{AlternativeSearch, ExhaustiveOracle, MemoryStore};
///
/// let inventory = Inventory::from_rows(&[InputRow {
///     container: "A".into(),
///     box_label: "1".into(),
///     cylinder_label: "1".into(),
///     weight: 4.0,
///     volume: 3.0,
///     density: 0.0,
/// }]);
/// let targets = SelectionTargets { container_count: 1, weight: 4.0, volume: 3.0 };
///
/// let mut search = AlternativeSearch::new(ExhaustiveOracle::new(), MemoryStore::new());
/// let outcome = search.run(&inventory, &targets).unwrap();
/// assert_eq!(outcome.accepted(), 1);
/// ```
#[derive(Debug)]
pub struct AlternativeSearch<O, St> {
    oracle: O,
    store: St,
    max_solutions: usize,
    precision: u32,
}

impl<O: SolverOracle, St: SolutionStore> AlternativeSearch<O, St> {
    /// Creates a search with the default cap and precision.
    pub fn new(oracle: O, store: St) -> Self {
        Self {
            oracle,
            store,
            max_solutions: DEFAULT_MAX_SOLUTIONS,
            precision: DEFAULT_PRECISION,
        }
    }

    /// Sets the cap on accepted solutions. The loop guard is
    /// `counter <= max`, so at most `max + 1` solutions are written.
    pub fn with_max_solutions(mut self, max_solutions: usize) -> Self {
        self.max_solutions = max_solutions;
        self
    }

    /// Sets the rounding precision used by the validator.
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Takes the cap and precision from a loaded configuration.
    pub fn with_config(mut self, config: &SearchConfig) -> Self {
        self.max_solutions = config.max_solutions;
        self.precision = config.precision;
        self
    }

    /// Access to the store, for reading solutions back after a run.
    pub fn store(&self) -> &St {
        &self.store
    }

    /// Runs the search to completion and returns the accepted solutions.
    pub fn run(
        &mut self,
        inventory: &Inventory,
        targets: &SelectionTargets,
    ) -> Result<SearchOutcome> {
        // Idempotent short-circuit: a prior run that wrote the sentinel
        // index already finished this search.
        let sentinel = self.max_solutions + 1;
        if self.store.contains(sentinel) {
            info!(event = "search_skipped", sentinel);
            return Ok(SearchOutcome {
                solutions: Vec::new(),
                stop: StopReason::AlreadyComplete,
            });
        }

        let mut model = build_model(inventory, targets);
        let mut validator = SolutionValidator::new(self.precision);
        let mut solutions = Vec::new();

        info!(
            event = "search_start",
            oracle = self.oracle.name(),
            variables = model.variables().len(),
            constraints = model.constraints().len(),
            max_solutions = self.max_solutions,
        );

        let mut counter = 0usize;
        let stop = loop {
            if counter > self.max_solutions {
                break StopReason::CapReached;
            }

            let assignment = match self.oracle.solve(&model)? {
                SolveStatus::Optimal(assignment) => assignment,
                SolveStatus::Infeasible => {
                    debug!(event = "solve_infeasible", iteration = counter);
                    break StopReason::Infeasible;
                }
            };

            let Some(solution) = validator.validate(inventory, &model, &assignment, targets)
            else {
                debug!(event = "validation_rejected", iteration = counter);
                break StopReason::Rejected;
            };

            self.store.save(counter + 1, &solution)?;
            info!(
                event = "solution_accepted",
                index = counter + 1,
                cylinders = solution.cylinder_ids.len(),
            );

            let excluded: Vec<VarId> = solution
                .cylinder_ids
                .iter()
                .filter_map(|id| model.var(id))
                .collect();
            model.exclude_selection(&excluded);

            solutions.push(solution);
            counter += 1;
        };

        info!(event = "search_end", accepted = solutions.len(), stop = ?stop);
        Ok(SearchOutcome { solutions, stop })
    }
}
