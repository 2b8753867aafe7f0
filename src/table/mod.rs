//! Transition table: the fixed description of a machine.
//!
//! A table lists every state once, with its entry action and its outgoing
//! transitions in priority order. The end of a transition list means "no
//! transition": the machine stays put and only the entry action re-runs.
//!
//! Tables are usually assembled with [`TableBuilder`](crate::builder::TableBuilder)
//! and checked by the machine at initialize time.

mod transition;
mod validate;

pub use transition::{StateEntry, Transition};

pub(crate) use validate::validate_table;

use crate::core::{Measurement, State};

/// Ordered set of states plus the designated initial state.
#[derive(Clone, Debug)]
pub struct TransitionTable<S: State, P: Measurement> {
    initial: S,
    entries: Vec<StateEntry<S, P>>,
}

impl<S: State, P: Measurement> TransitionTable<S, P> {
    /// Assemble a table without checking it. The machine validates it
    /// during `initialize`.
    pub fn new(initial: S, entries: Vec<StateEntry<S, P>>) -> Self {
        Self { initial, entries }
    }

    pub fn initial(&self) -> &S {
        &self.initial
    }

    pub fn get(&self, state: &S) -> Option<&StateEntry<S, P>> {
        self.entries.iter().find(|entry| entry.state == *state)
    }

    pub fn contains(&self, state: &S) -> bool {
        self.get(state).is_some()
    }

    pub fn entries(&self) -> &[StateEntry<S, P>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn position(&self, state: &S) -> Option<usize> {
        self.entries.iter().position(|entry| entry.state == *state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Comparison;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum TestState {
        Cold,
        Warm,
        Hot,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Cold => "Cold",
                Self::Warm => "Warm",
                Self::Hot => "Hot",
            }
        }
    }

    fn table() -> TransitionTable<TestState, i32> {
        let mut cold = StateEntry::new(TestState::Cold);
        cold.transitions
            .push(Transition::new(Comparison::GreaterOrEqual, 20, TestState::Warm));
        let mut warm = StateEntry::new(TestState::Warm);
        warm.transitions
            .push(Transition::new(Comparison::LessThan, 20, TestState::Cold));

        TransitionTable::new(TestState::Cold, vec![cold, warm])
    }

    #[test]
    fn lookup_by_state() {
        let table = table();

        assert_eq!(table.initial(), &TestState::Cold);
        assert_eq!(table.len(), 2);
        assert!(table.contains(&TestState::Warm));
        assert!(!table.contains(&TestState::Hot));
        assert_eq!(table.get(&TestState::Warm).unwrap().transitions.len(), 1);
        assert_eq!(table.position(&TestState::Warm), Some(1));
    }

    #[test]
    fn empty_table() {
        let table: TransitionTable<TestState, i32> = TransitionTable::new(TestState::Cold, vec![]);
        assert!(table.is_empty());
        assert!(table.get(&TestState::Cold).is_none());
    }
}
