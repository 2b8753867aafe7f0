//! Machine configuration supplied once at initialize time.

use crate::core::{Measurement, State, StateHistory};
use crate::table::{validate_table, TransitionTable};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A single problem found while checking a configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigViolation {
    #[error("Transition table has no states")]
    EmptyTable,

    #[error("Initial state '{state}' is not in the table")]
    MissingInitialState { state: String },

    #[error("State '{state}' is declared more than once")]
    DuplicateState { state: String },

    #[error("Transition from '{from}' targets unknown state '{to}'")]
    UnknownDestination { from: String, to: String },

    #[error("State '{state}' cannot be reached from the initial state")]
    UnreachableState { state: String },

    #[error("Hysteresis margin must be non-negative (got {margin})")]
    NegativeMargin { margin: String },
}

/// Everything a machine needs to start: the table and the hysteresis margin.
#[derive(Clone, Debug)]
pub struct MachineConfig<S: State, P: Measurement> {
    pub hysteresis_margin: P,
    pub table: TransitionTable<S, P>,
    pub history_capacity: usize,
}

impl<S: State, P: Measurement> MachineConfig<S, P> {
    pub fn new(table: TransitionTable<S, P>, hysteresis_margin: P) -> Self {
        Self {
            hysteresis_margin,
            table,
            history_capacity: StateHistory::<S, P>::DEFAULT_CAPACITY,
        }
    }

    /// Keep at most `capacity` transitions in the machine's history.
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Check the margin and the table, collecting every violation.
    pub fn validate(&self) -> Result<(), Vec<ConfigViolation>> {
        let margin: Validation<(), NonEmptyVec<ConfigViolation>> =
            if self.hysteresis_margin >= P::zero() {
                Validation::success(())
            } else {
                Validation::fail(ConfigViolation::NegativeMargin {
                    margin: format!("{:?}", self.hysteresis_margin),
                })
            };

        match Validation::all_vec(vec![margin, validate_table(&self.table)]) {
            Validation::Success(_) => Ok(()),
            Validation::Failure(errors) => Err(errors.iter().cloned().collect()),
        }
    }
}
