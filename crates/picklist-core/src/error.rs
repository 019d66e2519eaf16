//! Error types for picklist

use thiserror::Error;

/// Main error type for picklist operations.
///
/// Infeasibility and validation rejection are deliberately *not* errors:
/// they are expected loop outcomes, surfaced as values by the solver crate.
#[derive(Debug, Error)]
pub enum PicklistError {
    /// Error in the model or its inputs
    #[error("Model error: {0}")]
    Model(String),

    /// Error reported by a solver oracle
    #[error("Solve error: {0}")]
    Solve(String),

    /// Error while persisting or reading a stored solution
    #[error("Store error: {0}")]
    Store(#[from] std::io::Error),

    /// Invalid operation for the current search state
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Result type alias for picklist operations
pub type Result<T> = std::result::Result<T, PicklistError>;
