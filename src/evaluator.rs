//! Transition selection.
//!
//! Walks the current state's transitions in declared order and returns the
//! first one whose guard holds. A transition leading back across the pinned
//! boundary is compared against the widened threshold. Running off the end
//! of the list selects nothing, which is the implicit self-loop.

use crate::core::{Measurement, State};
use crate::hysteresis::HysteresisTracker;
use crate::machine::MachineError;
use crate::table::{Transition, TransitionTable};

/// Outcome of one evaluation.
#[derive(Debug)]
pub enum Selection<'t, S: State, P: Measurement> {
    /// This transition's guard held first. Its destination may be the
    /// current state (an explicit self-transition).
    Fire(&'t Transition<S, P>),
    /// No guard held; stay in the current state and fire no transition
    /// callback.
    Stay,
}

impl<'t, S: State, P: Measurement> Selection<'t, S, P> {
    pub fn transition(&self) -> Option<&'t Transition<S, P>> {
        match *self {
            Self::Fire(transition) => Some(transition),
            Self::Stay => None,
        }
    }

    /// Where the machine goes from `current`.
    pub fn destination<'a>(&self, current: &'a S) -> &'a S
    where
        't: 'a,
    {
        match *self {
            Self::Fire(transition) => &transition.to,
            Self::Stay => current,
        }
    }
}

/// Select the transition out of `current` for `parameter`.
///
/// Pure: the tracker is only read, so repeated calls with the same inputs
/// return the same selection.
pub fn evaluate<'t, S: State, P: Measurement>(
    table: &'t TransitionTable<S, P>,
    current: &S,
    parameter: P,
    tracker: &HysteresisTracker<S, P>,
) -> Result<Selection<'t, S, P>, MachineError> {
    let entry = table
        .get(current)
        .ok_or_else(|| MachineError::UnknownState {
            state: current.name().to_string(),
        })?;

    let selected = entry.transitions.iter().find(|transition| {
        let threshold = transition
            .guard
            .effective_threshold(tracker.band_for(transition));
        transition.guard.comparison.holds(parameter, threshold)
    });

    Ok(selected.map_or(Selection::Stay, Selection::Fire))
}
