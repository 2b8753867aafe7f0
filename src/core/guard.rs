//! Threshold guards that control transitions.
//!
//! A guard is a comparison kind plus a threshold. Guards are pure: checking
//! one never changes anything, so the same reading always gives the same
//! answer for the same (possibly widened) threshold.

use super::measurement::Measurement;
use serde::{Deserialize, Serialize};

/// How a reading is compared against a guard's threshold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparison {
    Equal,
    LessThan,
    GreaterThan,
    LessOrEqual,
    GreaterOrEqual,
    NotEqual,
}

impl Comparison {
    /// Whether `value <op> threshold` holds.
    pub fn holds<P: PartialOrd>(self, value: P, threshold: P) -> bool {
        match self {
            Self::Equal => value == threshold,
            Self::LessThan => value < threshold,
            Self::GreaterThan => value > threshold,
            Self::LessOrEqual => value <= threshold,
            Self::GreaterOrEqual => value >= threshold,
            Self::NotEqual => value != threshold,
        }
    }

    /// Ordered comparisons are the only ones that get a hysteresis band.
    pub fn is_ordered(self) -> bool {
        !matches!(self, Self::Equal | Self::NotEqual)
    }

    /// Move `threshold` outward by `margin`, away from the region this
    /// comparison accepts. Equality comparisons are returned unchanged.
    pub fn widen<P: Measurement>(self, threshold: P, margin: P) -> P {
        match self {
            Self::LessThan | Self::LessOrEqual => threshold.lowered_by(margin),
            Self::GreaterThan | Self::GreaterOrEqual => threshold.raised_by(margin),
            Self::Equal | Self::NotEqual => threshold,
        }
    }
}

/// Comparison of a reading against a fixed threshold.
///
/// # Example
///
/// ```rust
/// use hysteresis_fsm::core::{Comparison, Guard};
///
/// let closer_than_30 = Guard::new(Comparison::LessOrEqual, 30);
///
/// assert!(closer_than_30.check(30));
/// assert!(!closer_than_30.check(31));
///
/// // With a 2 unit band the guard only fires at 28 or below.
/// assert!(!closer_than_30.check_widened(29, 2));
/// assert!(closer_than_30.check_widened(28, 2));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Guard<P: Measurement> {
    pub comparison: Comparison,
    pub threshold: P,
}

impl<P: Measurement> Guard<P> {
    pub fn new(comparison: Comparison, threshold: P) -> Self {
        Self {
            comparison,
            threshold,
        }
    }

    /// Check the reading against the literal threshold.
    pub fn check(&self, value: P) -> bool {
        self.comparison.holds(value, self.threshold)
    }

    /// Check the reading against the threshold widened by `margin`.
    pub fn check_widened(&self, value: P, margin: P) -> bool {
        self.comparison
            .holds(value, self.effective_threshold(Some(margin)))
    }

    /// The threshold actually compared against, given an optional band.
    pub fn effective_threshold(&self, margin: Option<P>) -> P {
        match margin {
            Some(margin) => self.comparison.widen(self.threshold, margin),
            None => self.threshold,
        }
    }

    /// Whether `value` sits at least `margin` past this guard's threshold on
    /// the side the guard accepts. Equality guards are always considered
    /// clear, since they never carry a band.
    pub fn cleared_by(&self, value: P, margin: P) -> bool {
        match self.comparison {
            Comparison::LessThan | Comparison::LessOrEqual => {
                value <= self.threshold.lowered_by(margin)
            }
            Comparison::GreaterThan | Comparison::GreaterOrEqual => {
                value >= self.threshold.raised_by(margin)
            }
            Comparison::Equal | Comparison::NotEqual => true,
        }
    }
}
