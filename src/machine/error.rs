//! Errors returned by the state machine controller.

use crate::config::ConfigViolation;
use thiserror::Error;

/// Errors that can occur while initializing or updating a machine.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MachineError {
    #[error("State machine updated before initialize")]
    NotInitialized,

    #[error("State machine is already initialized")]
    AlreadyInitialized,

    #[error("Invalid configuration: {}", describe(.0))]
    InvalidConfiguration(Vec<ConfigViolation>),

    #[error("State '{state}' is not in the transition table")]
    UnknownState { state: String },
}

fn describe(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
