//! Build errors for table and transition builders.

use thiserror::Error;

/// Errors that can occur when building tables and transitions.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("No states defined. Add at least one state")]
    NoStates,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,

    #[error("Transition guard not specified. Call .when(comparison, threshold)")]
    MissingGuard,
}
