//! Core types shared by every part of the engine.
//!
//! - State identifiers via the `State` trait
//! - Readings via the `Measurement` trait
//! - Threshold guards and their comparison kinds
//! - Callbacks (`Action`)
//! - Bounded transition history

mod action;
mod guard;
mod history;
mod measurement;
mod state;

pub use action::Action;
pub use guard::{Comparison, Guard};
pub use history::{StateHistory, StateTransition};
pub use measurement::Measurement;
pub use state::State;
