//! Hysteresis FSM: a table-driven state machine for classifying readings
//!
//! A continuous reading (a distance, a temperature) is mapped onto a small
//! set of discrete states by a fixed transition table. Each state lists its
//! outgoing transitions in priority order, each guarded by a comparison
//! against a threshold; the first guard that holds wins.
//!
//! To stop a noisy reading from flipping the machine back and forth at a
//! boundary, the boundary most recently crossed is pinned and the transition
//! leading back across it is held off by a hysteresis margin until the
//! reading has clearly settled on one side.
//!
//! # Core Concepts
//!
//! - **Table**: states, entry actions and ordered, guarded transitions
//! - **Hysteresis tracker**: the single pinned boundary and its band
//! - **Evaluator**: pure first-match transition selection
//! - **Machine**: initialize once, then `update` on every poll
//!
//! # Example
//!
//! ```rust
//! use hysteresis_fsm::alert::{self, AlertLevel, Indicator};
//! use hysteresis_fsm::StateMachine;
//! use std::sync::Arc;
//!
//! struct Dark;
//!
//! impl Indicator for Dark {
//!     fn set_red(&self, _on: bool) {}
//!     fn set_green(&self, _on: bool) {}
//!     fn start_blinking(&self) {}
//!     fn stop_blinking(&self) {}
//! }
//!
//! let config = alert::config(Arc::new(Dark)).unwrap();
//! let mut machine = StateMachine::start(config).unwrap();
//!
//! assert_eq!(machine.update(35).unwrap(), AlertLevel::NoAlert);
//! assert_eq!(machine.update(29).unwrap(), AlertLevel::LowAlert);
//! // 31 sits inside the 2 cm band above 30: no return to NoAlert yet.
//! assert_eq!(machine.update(31).unwrap(), AlertLevel::LowAlert);
//! ```

pub mod alert;
pub mod builder;
pub mod config;
pub mod core;
pub mod driver;
pub mod evaluator;
pub mod hysteresis;
pub mod machine;
pub mod sensor;
pub mod table;

// Re-export commonly used types
pub use crate::core::{Action, Comparison, Guard, Measurement, State};
pub use config::{ConfigViolation, MachineConfig};
pub use hysteresis::HysteresisTracker;
pub use machine::{MachineError, Snapshot, StateMachine};
pub use table::{StateEntry, Transition, TransitionTable};
