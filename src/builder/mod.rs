//! Builder API for ergonomic table construction.
//!
//! This module provides fluent builders and a macro for declaring states and
//! transition tables with minimal boilerplate.
//!
//! # Example
//!
//! ```
//! use hysteresis_fsm::builder::TableBuilder;
//! use hysteresis_fsm::core::Comparison;
//! use hysteresis_fsm::state_enum;
//!
//! state_enum! {
//!     enum Gauge {
//!         Normal,
//!         Hot,
//!     }
//! }
//!
//! let table = TableBuilder::new()
//!     .initial(Gauge::Normal)
//!     .state(Gauge::Normal, |s| s.when(Comparison::GreaterOrEqual, 90.0, Gauge::Hot))
//!     .state(Gauge::Hot, |s| {
//!         s.on_entry(|| println!("too hot"))
//!             .when(Comparison::LessThan, 90.0, Gauge::Normal)
//!     })
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(table.len(), 2);
//! ```

pub mod error;
pub mod macros;
pub mod table;
pub mod transition;

pub use error::BuildError;
pub use table::{StateBuilder, TableBuilder};
pub use transition::TransitionBuilder;
