//! Builder for constructing transitions.

use crate::builder::error::BuildError;
use crate::core::{Action, Comparison, Guard, Measurement, State};
use crate::table::Transition;

/// Builder for constructing transitions with a fluent API.
pub struct TransitionBuilder<S: State, P: Measurement> {
    to: Option<S>,
    guard: Option<Guard<P>>,
    action: Option<Action>,
}

impl<S: State, P: Measurement> TransitionBuilder<S, P> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            to: None,
            guard: None,
            action: None,
        }
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    /// Set the guard (required).
    pub fn guard(mut self, guard: Guard<P>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Set the guard from its parts (required).
    pub fn when(self, comparison: Comparison, threshold: P) -> Self {
        self.guard(Guard::new(comparison, threshold))
    }

    /// Run `f` whenever this transition is selected (optional).
    pub fn action<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.action = Some(Action::new(f));
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition<S, P>, BuildError> {
        let to = self.to.ok_or(BuildError::MissingToState)?;
        let guard = self.guard.ok_or(BuildError::MissingGuard)?;

        Ok(Transition {
            guard,
            to,
            on_fire: self.action,
        })
    }
}

impl<S: State, P: Measurement> Default for TransitionBuilder<S, P> {
    fn default() -> Self {
        Self::new()
    }
}
