//! State transition history tracking.
//!
//! The machine runs indefinitely, so history is a bounded ring: once full,
//! recording a transition evicts the oldest one.

use super::measurement::Measurement;
use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single state change.
///
/// # Example
///
/// ```rust
/// use hysteresis_fsm::core::{State, StateTransition};
/// use serde::{Deserialize, Serialize};
/// use chrono::Utc;
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Zone {
///     Far,
///     Near,
/// }
///
/// impl State for Zone {
///     fn name(&self) -> &str {
///         match self {
///             Self::Far => "Far",
///             Self::Near => "Near",
///         }
///     }
/// }
///
/// let transition = StateTransition {
///     from: Zone::Far,
///     to: Zone::Near,
///     parameter: 29,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.parameter, 29);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State, P: Measurement> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// The reading that caused the transition
    pub parameter: P,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Most recent state changes, oldest first.
///
/// # Example
///
/// ```rust
/// use hysteresis_fsm::core::{State, StateHistory, StateTransition};
/// use serde::{Deserialize, Serialize};
/// use chrono::Utc;
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Step { A, B, C }
///
/// impl State for Step {
///     fn name(&self) -> &str {
///         match self {
///             Self::A => "A",
///             Self::B => "B",
///             Self::C => "C",
///         }
///     }
/// }
///
/// let mut history = StateHistory::with_capacity(2);
/// for (from, to) in [(Step::A, Step::B), (Step::B, Step::C), (Step::C, Step::A)] {
///     history.record(StateTransition { from, to, parameter: 0, timestamp: Utc::now() });
/// }
///
/// // Only the two most recent transitions are kept.
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.get_path(), vec![&Step::B, &Step::C, &Step::A]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State, P: Measurement> {
    capacity: usize,
    transitions: VecDeque<StateTransition<S, P>>,
}

impl<S: State, P: Measurement> StateHistory<S, P> {
    pub const DEFAULT_CAPACITY: usize = 32;

    /// Create an empty history keeping at most `capacity` transitions.
    /// A capacity of zero disables recording.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            transitions: VecDeque::with_capacity(capacity),
        }
    }

    /// Record a transition, evicting the oldest one when full.
    pub fn record(&mut self, transition: StateTransition<S, P>) {
        if self.capacity == 0 {
            return;
        }
        if self.transitions.len() == self.capacity {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// States traversed by the retained transitions: the `from` of the
    /// oldest one, then the `to` of each.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        path.extend(self.transitions.iter().map(|t| &t.to));
        path
    }

    /// Time between the oldest and newest retained transitions.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.front()?, self.transitions.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn transitions(&self) -> impl ExactSizeIterator<Item = &StateTransition<S, P>> {
        self.transitions.iter()
    }

    pub fn last(&self) -> Option<&StateTransition<S, P>> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<S: State, P: Measurement> Default for StateHistory<S, P> {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}
