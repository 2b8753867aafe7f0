//! Per-boundary hysteresis.
//!
//! After a transition fires, the boundary it crossed is pinned. While the pin
//! holds, the transition leading back across that boundary compares against
//! a threshold moved outward by the margin, so a reading that wobbles around
//! the original threshold cannot bounce the machine back and forth. Every
//! other transition keeps its literal threshold.
//!
//! The pin is released once a reading lands at least the margin past the
//! crossed threshold, on the side the machine moved to.

use crate::core::{Guard, Measurement, State};
use crate::table::Transition;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The boundary currently holding a band.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Pin<S: State, P: Measurement> {
    /// State the pinned transition fired from. Transitions back into it are
    /// the ones that get widened.
    pub return_state: S,
    /// State the pinned transition fired into.
    pub destination: S,
    /// Guard of the pinned transition.
    pub guard: Guard<P>,
}

/// Tracks at most one pinned boundary.
#[derive(Clone, Debug)]
pub struct HysteresisTracker<S: State, P: Measurement> {
    margin: P,
    pinned: Option<Pin<S, P>>,
}

impl<S: State, P: Measurement> HysteresisTracker<S, P> {
    /// A disarmed tracker. `margin` is expected to be non-negative; the
    /// machine checks this at initialize time.
    pub fn new(margin: P) -> Self {
        Self {
            margin,
            pinned: None,
        }
    }

    pub fn margin(&self) -> P {
        self.margin
    }

    pub fn is_armed(&self) -> bool {
        self.pinned.is_some()
    }

    pub fn pinned(&self) -> Option<&Pin<S, P>> {
        self.pinned.as_ref()
    }

    /// Pin `transition`, fired from `from`. Replaces any earlier pin.
    pub fn arm(&mut self, from: S, transition: &Transition<S, P>) {
        debug!(
            return_state = from.name(),
            destination = transition.to.name(),
            threshold = ?transition.guard.threshold,
            "hysteresis armed"
        );
        self.pinned = Some(Pin {
            return_state: from,
            destination: transition.to.clone(),
            guard: transition.guard,
        });
    }

    pub fn disarm(&mut self) {
        self.pinned = None;
    }

    /// Whether `candidate` is evaluated against a widened threshold: the
    /// tracker is armed, the candidate leads back to the pinned return state
    /// and its comparison is ordered.
    pub fn is_widened_for(&self, candidate: &Transition<S, P>) -> bool {
        self.pinned.as_ref().is_some_and(|pin| {
            pin.return_state == candidate.to && candidate.guard.comparison.is_ordered()
        })
    }

    /// The band to apply to `candidate`, if any.
    pub fn band_for(&self, candidate: &Transition<S, P>) -> Option<P> {
        self.is_widened_for(candidate).then_some(self.margin)
    }

    /// Release the pin once `parameter` has cleared the pinned threshold by
    /// the margin. Equality pins are released immediately. Returns `true`
    /// when this call disarmed the tracker.
    pub fn relax(&mut self, parameter: P) -> bool {
        let cleared = self
            .pinned
            .as_ref()
            .is_some_and(|pin| pin.guard.cleared_by(parameter, self.margin));
        if cleared {
            debug!(parameter = ?parameter, "hysteresis disarmed");
            self.pinned = None;
        }
        cleared
    }
}
