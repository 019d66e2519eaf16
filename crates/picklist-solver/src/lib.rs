//! Picklist Solver - oracle boundary, validation and alternative-optima search
//!
//! This crate hosts everything downstream of the model:
//! - [`SolverOracle`]: the black-box boundary to a feasibility engine
//! - [`ExhaustiveOracle`]: a small exact reference oracle
//! - [`SolutionValidator`]: independent re-verification of raw assignments
//! - [`AlternativeSearch`]: the re-solve loop with exclusion constraints
//! - [`SolutionStore`]: the persisted-solution boundary

pub mod exhaustive;
pub mod oracle;
pub mod search;
pub mod store;
pub mod validator;


pub use exhaustive::ExhaustiveOracle;
pub use oracle::{SolveStatus, SolverOracle};
pub use search::{AlternativeSearch, SearchOutcome, StopReason};
pub use store::{render_solution, FsSolutionStore, MemoryStore, SolutionStore};
pub use validator::{AcceptedSolution, SolutionValidator};
