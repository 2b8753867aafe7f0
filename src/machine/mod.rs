//! State machine controller.
//!
//! Owns the current and previous state, the hysteresis tracker and the
//! transition history. A machine starts uninitialized; `initialize` checks
//! the configuration and enters the initial state, after which `update` is
//! polled with fresh readings for as long as the owner likes.

mod error;

pub use error::MachineError;

use crate::config::MachineConfig;
use crate::core::{Measurement, State, StateHistory, StateTransition};
use crate::evaluator::evaluate;
use crate::hysteresis::{HysteresisTracker, Pin};
use crate::table::TransitionTable;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

/// Serializable view of a running machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Snapshot<S: State, P: Measurement> {
    pub current: S,
    pub previous: S,
    pub hysteresis_margin: P,
    pub pinned: Option<Pin<S, P>>,
}

/// Table-driven state machine with per-boundary hysteresis.
///
/// # Example
///
/// ```rust
/// use hysteresis_fsm::builder::TableBuilder;
/// use hysteresis_fsm::core::Comparison;
/// use hysteresis_fsm::{state_enum, MachineConfig, StateMachine};
///
/// state_enum! {
///     enum Level {
///         Clear,
///         Warning,
///     }
/// }
///
/// let table = TableBuilder::new()
///     .initial(Level::Clear)
///     .state(Level::Clear, |s| s.when(Comparison::LessOrEqual, 30, Level::Warning))
///     .state(Level::Warning, |s| s.when(Comparison::GreaterThan, 30, Level::Clear))
///     .build()
///     .unwrap();
///
/// let mut machine = StateMachine::new();
/// machine.initialize(MachineConfig::new(table, 2)).unwrap();
///
/// assert_eq!(machine.update(29).unwrap(), Level::Warning);
/// // 31 is inside the band around 30, so the machine holds.
/// assert_eq!(machine.update(31).unwrap(), Level::Warning);
/// assert_eq!(machine.update(33).unwrap(), Level::Clear);
/// ```
pub struct StateMachine<S: State, P: Measurement> {
    running: Option<Running<S, P>>,
}

struct Running<S: State, P: Measurement> {
    table: TransitionTable<S, P>,
    tracker: HysteresisTracker<S, P>,
    current: S,
    previous: S,
    history: StateHistory<S, P>,
}

impl<S: State, P: Measurement> StateMachine<S, P> {
    /// Create an uninitialized machine.
    pub fn new() -> Self {
        Self { running: None }
    }

    /// Create and initialize a machine in one call.
    pub fn start(config: MachineConfig<S, P>) -> Result<Self, MachineError> {
        let mut machine = Self::new();
        machine.initialize(config)?;
        Ok(machine)
    }

    /// Validate `config`, enter the initial state and run its entry action.
    ///
    /// Fails closed: on an invalid configuration the machine stays
    /// uninitialized. A machine can only be initialized once.
    pub fn initialize(&mut self, config: MachineConfig<S, P>) -> Result<S, MachineError> {
        if self.running.is_some() {
            return Err(MachineError::AlreadyInitialized);
        }
        config
            .validate()
            .map_err(MachineError::InvalidConfiguration)?;

        let MachineConfig {
            hysteresis_margin,
            table,
            history_capacity,
        } = config;
        let initial = table.initial().clone();
        let entry = table.get(&initial).ok_or_else(|| MachineError::UnknownState {
            state: initial.name().to_string(),
        })?;
        entry.on_entry.fire();

        info!(
            initial = initial.name(),
            states = table.len(),
            hysteresis_margin = ?hysteresis_margin,
            "state machine initialized"
        );

        self.running = Some(Running {
            tracker: HysteresisTracker::new(hysteresis_margin),
            current: initial.clone(),
            previous: initial.clone(),
            history: StateHistory::with_capacity(history_capacity),
            table,
        });
        Ok(initial)
    }

    /// Feed one reading through the machine and return the resulting state.
    pub fn update(&mut self, parameter: P) -> Result<S, MachineError> {
        self.running
            .as_mut()
            .ok_or(MachineError::NotInitialized)?
            .step(parameter)
    }

    pub fn is_initialized(&self) -> bool {
        self.running.is_some()
    }

    pub fn current_state(&self) -> Option<&S> {
        self.running.as_ref().map(|r| &r.current)
    }

    /// State held immediately before the most recent transition.
    pub fn previous_state(&self) -> Option<&S> {
        self.running.as_ref().map(|r| &r.previous)
    }

    pub fn hysteresis(&self) -> Option<&HysteresisTracker<S, P>> {
        self.running.as_ref().map(|r| &r.tracker)
    }

    pub fn history(&self) -> Option<&StateHistory<S, P>> {
        self.running.as_ref().map(|r| &r.history)
    }

    pub fn table(&self) -> Option<&TransitionTable<S, P>> {
        self.running.as_ref().map(|r| &r.table)
    }

    pub fn snapshot(&self) -> Option<Snapshot<S, P>> {
        self.running.as_ref().map(|r| Snapshot {
            current: r.current.clone(),
            previous: r.previous.clone(),
            hysteresis_margin: r.tracker.margin(),
            pinned: r.tracker.pinned().cloned(),
        })
    }
}

impl<S: State, P: Measurement> Default for StateMachine<S, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, P: Measurement> Running<S, P> {
    fn step(&mut self, parameter: P) -> Result<S, MachineError> {
        let selection = evaluate(&self.table, &self.current, parameter, &self.tracker)?;
        let destination = selection.destination(&self.current).clone();
        let entry = self
            .table
            .get(&destination)
            .ok_or_else(|| MachineError::UnknownState {
                state: destination.name().to_string(),
            })?;

        match selection.transition() {
            Some(transition) if destination != self.current => {
                debug!(
                    from = self.current.name(),
                    to = destination.name(),
                    parameter = ?parameter,
                    "state transition"
                );
                self.previous = std::mem::replace(&mut self.current, destination);
                self.tracker.arm(self.previous.clone(), transition);
                self.history.record(StateTransition {
                    from: self.previous.clone(),
                    to: self.current.clone(),
                    parameter,
                    timestamp: Utc::now(),
                });
            }
            Some(transition) => {
                trace!(state = self.current.name(), parameter = ?parameter, "self-transition");
                if self.tracker.is_armed() {
                    self.tracker.arm(self.previous.clone(), transition);
                }
            }
            None => {
                trace!(state = self.current.name(), parameter = ?parameter, "no transition");
            }
        }

        self.tracker.relax(parameter);

        if let Some(action) = selection.transition().and_then(|t| t.on_fire.as_ref()) {
            action.fire();
        }
        entry.on_entry.fire();

        Ok(self.current.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigViolation;
    use crate::core::{Action, Comparison};
    use crate::table::{StateEntry, Transition};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum Zone {
        A,
        B,
        C,
    }

    impl State for Zone {
        fn name(&self) -> &str {
            match self {
                Self::A => "A",
                Self::B => "B",
                Self::C => "C",
            }
        }
    }

    type Log = Arc<Mutex<Vec<String>>>;

    fn logging(log: &Log, label: &str) -> Action {
        let log = Arc::clone(log);
        let label = label.to_string();
        Action::new(move || log.lock().unwrap().push(label.clone()))
    }

    fn drain(log: &Log) -> Vec<String> {
        std::mem::take(&mut *log.lock().unwrap())
    }

    /// A <-(>30)- B <-(>20)- C, moving right on <=30 and <=20. C has an
    /// explicit self-transition on <=20 carrying a callback.
    fn config(log: &Log) -> MachineConfig<Zone, i32> {
        let entry = |state: Zone, label: &str, transitions: Vec<Transition<Zone, i32>>| StateEntry {
            state,
            on_entry: logging(log, label),
            transitions,
        };
        let table = TransitionTable::new(
            Zone::A,
            vec![
                entry(
                    Zone::A,
                    "enter A",
                    vec![Transition::new(Comparison::LessOrEqual, 30, Zone::B)
                        .with_action(logging(log, "fire A->B"))],
                ),
                entry(
                    Zone::B,
                    "enter B",
                    vec![
                        Transition::new(Comparison::GreaterThan, 30, Zone::A),
                        Transition::new(Comparison::LessOrEqual, 20, Zone::C),
                    ],
                ),
                entry(
                    Zone::C,
                    "enter C",
                    vec![
                        Transition::new(Comparison::GreaterThan, 20, Zone::B),
                        Transition::new(Comparison::LessOrEqual, 20, Zone::C)
                            .with_action(logging(log, "fire C->C")),
                    ],
                ),
            ],
        );
        MachineConfig::new(table, 2)
    }

    fn started(log: &Log) -> StateMachine<Zone, i32> {
        let machine = StateMachine::start(config(log)).unwrap();
        drain(log);
        machine
    }

    #[test]
    fn update_before_initialize_fails() {
        let mut machine: StateMachine<Zone, i32> = StateMachine::new();

        assert_eq!(machine.update(10), Err(MachineError::NotInitialized));
        assert!(!machine.is_initialized());
        assert!(machine.current_state().is_none());
        assert!(machine.snapshot().is_none());
    }

    #[test]
    fn initialize_enters_initial_state() {
        let log = Log::default();
        let mut machine = StateMachine::new();

        assert_eq!(machine.initialize(config(&log)), Ok(Zone::A));
        assert_eq!(drain(&log), vec!["enter A"]);
        assert_eq!(machine.current_state(), Some(&Zone::A));
        assert_eq!(machine.previous_state(), Some(&Zone::A));
        assert!(!machine.hysteresis().unwrap().is_armed());
    }

    #[test]
    fn initialize_twice_fails() {
        let log = Log::default();
        let mut machine = started(&log);

        assert_eq!(
            machine.initialize(config(&log)),
            Err(MachineError::AlreadyInitialized)
        );
        assert!(drain(&log).is_empty());
    }

    #[test]
    fn invalid_configuration_fails_closed() {
        let empty: TransitionTable<Zone, i32> = TransitionTable::new(Zone::A, Vec::new());
        let mut machine = StateMachine::new();

        let result = machine.initialize(MachineConfig::new(empty, 2));

        assert_eq!(
            result,
            Err(MachineError::InvalidConfiguration(vec![ConfigViolation::EmptyTable]))
        );
        assert!(!machine.is_initialized());
        assert_eq!(machine.update(1), Err(MachineError::NotInitialized));
    }

    #[test]
    fn transition_fires_callback_before_entry() {
        let log = Log::default();
        let mut machine = started(&log);

        assert_eq!(machine.update(29), Ok(Zone::B));
        assert_eq!(drain(&log), vec!["fire A->B", "enter B"]);
        assert_eq!(machine.previous_state(), Some(&Zone::A));
    }

    #[test]
    fn self_loop_refires_entry_only() {
        let log = Log::default();
        let mut machine = started(&log);

        assert_eq!(machine.update(40), Ok(Zone::A));
        assert_eq!(machine.update(45), Ok(Zone::A));
        assert_eq!(drain(&log), vec!["enter A", "enter A"]);
        assert!(machine.history().unwrap().is_empty());
    }

    #[test]
    fn explicit_self_transition_fires_its_callback() {
        let log = Log::default();
        let mut machine = started(&log);
        machine.update(29).unwrap();
        machine.update(19).unwrap();
        drain(&log);

        assert_eq!(machine.update(15), Ok(Zone::C));
        assert_eq!(drain(&log), vec!["fire C->C", "enter C"]);
        assert_eq!(machine.previous_state(), Some(&Zone::B));
    }

    #[test]
    fn previous_is_unchanged_without_transition() {
        let log = Log::default();
        let mut machine = started(&log);
        machine.update(29).unwrap();
        machine.update(25).unwrap();
        machine.update(24).unwrap();

        assert_eq!(machine.current_state(), Some(&Zone::B));
        assert_eq!(machine.previous_state(), Some(&Zone::A));
    }

    #[test]
    fn hysteresis_arms_on_transition_and_clears_past_margin() {
        let log = Log::default();
        let mut machine = started(&log);

        machine.update(30).unwrap();
        let pin = machine.hysteresis().unwrap().pinned().cloned().unwrap();
        assert_eq!(pin.return_state, Zone::A);
        assert_eq!(pin.destination, Zone::B);

        // Inside (28, 30]: band holds, no return to A.
        assert_eq!(machine.update(29), Ok(Zone::B));
        assert!(machine.hysteresis().unwrap().is_armed());

        // 28 clears the band without forcing a transition.
        assert_eq!(machine.update(28), Ok(Zone::B));
        assert!(!machine.hysteresis().unwrap().is_armed());
    }

    #[test]
    fn band_blocks_return_until_margin_exceeded() {
        let log = Log::default();
        let mut machine = started(&log);
        machine.update(29).unwrap();

        assert_eq!(machine.update(31), Ok(Zone::B));
        assert_eq!(machine.update(32), Ok(Zone::B));
        assert_eq!(machine.update(33), Ok(Zone::A));
    }

    #[test]
    fn disarmed_boundary_uses_literal_threshold() {
        let log = Log::default();
        let mut machine = started(&log);
        machine.update(29).unwrap();
        machine.update(25).unwrap();

        assert_eq!(machine.update(31), Ok(Zone::A));
    }

    #[test]
    fn history_records_transitions() {
        let log = Log::default();
        let mut machine = started(&log);
        for p in [29, 25, 19, 40] {
            machine.update(p).unwrap();
        }

        let history = machine.history().unwrap();
        let params: Vec<i32> = history.transitions().map(|t| t.parameter).collect();
        assert_eq!(params, vec![29, 19, 40]);
        assert_eq!(history.get_path(), vec![&Zone::A, &Zone::B, &Zone::C, &Zone::B]);
    }

    #[test]
    fn snapshot_serializes() {
        let log = Log::default();
        let mut machine = started(&log);
        machine.update(29).unwrap();

        let snapshot = machine.snapshot().unwrap();
        assert_eq!(snapshot.current, Zone::B);
        assert_eq!(snapshot.previous, Zone::A);
        assert_eq!(snapshot.hysteresis_margin, 2);

        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: Snapshot<Zone, i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, snapshot);
    }
}
