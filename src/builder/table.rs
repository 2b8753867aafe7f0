//! Builder for constructing transition tables.

use crate::builder::error::BuildError;
use crate::builder::transition::TransitionBuilder;
use crate::core::{Action, Comparison, Measurement, State};
use crate::table::{StateEntry, TransitionTable};

/// Collects one state's entry action and transitions, in priority order.
pub struct StateBuilder<S: State, P: Measurement> {
    state: S,
    on_entry: Action,
    transitions: Vec<TransitionBuilder<S, P>>,
}

impl<S: State, P: Measurement> StateBuilder<S, P> {
    pub fn new(state: S) -> Self {
        Self {
            state,
            on_entry: Action::noop(),
            transitions: Vec::new(),
        }
    }

    /// Run `f` every time the state is entered or re-entered.
    pub fn on_entry<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_entry = Action::new(f);
        self
    }

    /// Append a transition. Earlier transitions take priority.
    pub fn transition(mut self, builder: TransitionBuilder<S, P>) -> Self {
        self.transitions.push(builder);
        self
    }

    /// Append a transition to `to` taken when `<reading> <comparison> <threshold>`.
    pub fn when(self, comparison: Comparison, threshold: P, to: S) -> Self {
        self.transition(TransitionBuilder::new().when(comparison, threshold).to(to))
    }

    /// Like [`when`](Self::when), running `f` whenever the transition is
    /// selected.
    pub fn when_then<F>(self, comparison: Comparison, threshold: P, to: S, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.transition(
            TransitionBuilder::new()
                .when(comparison, threshold)
                .to(to)
                .action(f),
        )
    }

    /// Build the state entry.
    pub fn build(self) -> Result<StateEntry<S, P>, BuildError> {
        let transitions = self
            .transitions
            .into_iter()
            .map(TransitionBuilder::build)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(StateEntry {
            state: self.state,
            on_entry: self.on_entry,
            transitions,
        })
    }
}

/// Builder for constructing transition tables with a fluent API.
///
/// The builder only checks that the pieces are present. Structural checks
/// (unknown destinations, unreachable states, duplicates) run when the table
/// is handed to a machine.
pub struct TableBuilder<S: State, P: Measurement> {
    initial: Option<S>,
    states: Vec<StateBuilder<S, P>>,
}

impl<S: State, P: Measurement> TableBuilder<S, P> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            states: Vec::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Declare `state`, configuring it through `configure`.
    pub fn state<F>(self, state: S, configure: F) -> Self
    where
        F: FnOnce(StateBuilder<S, P>) -> StateBuilder<S, P>,
    {
        self.add_state(configure(StateBuilder::new(state)))
    }

    /// Add a prepared state builder.
    pub fn add_state(mut self, state: StateBuilder<S, P>) -> Self {
        self.states.push(state);
        self
    }

    /// Build the table.
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<TransitionTable<S, P>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        let entries = self
            .states
            .into_iter()
            .map(StateBuilder::build)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(TransitionTable::new(initial, entries))
    }
}

impl<S: State, P: Measurement> Default for TableBuilder<S, P> {
    fn default() -> Self {
        Self::new()
    }
}
