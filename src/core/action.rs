//! Side-effect callbacks attached to states and transitions.

use std::fmt;
use std::sync::Arc;

/// Zero-argument callback run by the machine.
///
/// Entry actions run every time a state is (re-)entered, including implicit
/// self-loops. Fired actions run when their transition is selected, before
/// the destination's entry action. What the callback does is up to the
/// owner; the machine only decides when it runs.
///
/// Cloning an action shares the underlying closure.
#[derive(Clone)]
pub struct Action(Arc<dyn Fn() + Send + Sync>);

impl Action {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// An action that does nothing.
    pub fn noop() -> Self {
        Self::new(|| {})
    }

    pub fn fire(&self) {
        (self.0)()
    }
}

impl Default for Action {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action")
    }
}
