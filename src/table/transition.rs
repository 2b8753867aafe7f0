//! Table rows: per-state entry actions and ordered transitions.

use crate::core::{Action, Comparison, Guard, Measurement, State};

/// A guarded move out of one state.
///
/// The source state is implied by the [`StateEntry`] that owns the
/// transition. The destination may equal the source, which makes an explicit
/// self-transition whose `on_fire` runs every time it is selected.
#[derive(Clone, Debug)]
pub struct Transition<S: State, P: Measurement> {
    pub guard: Guard<P>,
    pub to: S,
    pub on_fire: Option<Action>,
}

impl<S: State, P: Measurement> Transition<S, P> {
    pub fn new(comparison: Comparison, threshold: P, to: S) -> Self {
        Self {
            guard: Guard::new(comparison, threshold),
            to,
            on_fire: None,
        }
    }

    /// Attach a callback that runs when this transition is selected.
    pub fn with_action(mut self, action: Action) -> Self {
        self.on_fire = Some(action);
        self
    }
}

/// One state of the table with its entry action and its transitions in
/// priority order.
#[derive(Clone, Debug)]
pub struct StateEntry<S: State, P: Measurement> {
    pub state: S,
    pub on_entry: Action,
    pub transitions: Vec<Transition<S, P>>,
}

impl<S: State, P: Measurement> StateEntry<S, P> {
    pub fn new(state: S) -> Self {
        Self {
            state,
            on_entry: Action::noop(),
            transitions: Vec::new(),
        }
    }
}
