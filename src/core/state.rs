//! Core State trait for table-driven machines.
//!
//! States are plain identifiers. Their behaviour (entry actions, outgoing
//! transitions) lives in the [`TransitionTable`](crate::table::TransitionTable),
//! so the trait only asks for what the engine needs to compare, copy and
//! report a state.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state identifiers.
///
/// # Required Traits
///
/// - `Clone`: the controller keeps both the current and the previous state
/// - `PartialEq`: transition destinations are matched against table entries
/// - `Debug`: states show up in errors and tracing events
/// - `Serialize` + `Deserialize`: states appear in history and snapshots
/// - `Send` + `Sync`: a machine may be handed to another polling context
///
/// # Example
///
/// ```rust
/// use hysteresis_fsm::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Tank {
///     Empty,
///     Half,
///     Full,
/// }
///
/// impl State for Tank {
///     fn name(&self) -> &str {
///         match self {
///             Self::Empty => "Empty",
///             Self::Half => "Half",
///             Self::Full => "Full",
///         }
///     }
/// }
///
/// assert_eq!(Tank::Half.name(), "Half");
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}
