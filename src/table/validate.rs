//! Structural checks run on a table before the machine starts.
//!
//! Every check runs and every violation is reported, so a bad table can be
//! fixed in one pass instead of one error at a time.

use super::TransitionTable;
use crate::config::ConfigViolation;
use crate::core::{Measurement, State};
use std::collections::VecDeque;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<ConfigViolation>>;

pub(crate) fn validate_table<S: State, P: Measurement>(table: &TransitionTable<S, P>) -> Check {
    if table.is_empty() {
        return Validation::fail(ConfigViolation::EmptyTable);
    }

    let mut checks: Vec<Check> = Vec::new();
    checks.push(check_initial(table));
    checks.extend(check_duplicates(table));
    checks.extend(check_destinations(table));
    checks.extend(check_reachability(table));

    Validation::all_vec(checks).map(|_| ())
}

fn check_initial<S: State, P: Measurement>(table: &TransitionTable<S, P>) -> Check {
    if table.contains(table.initial()) {
        Validation::success(())
    } else {
        Validation::fail(ConfigViolation::MissingInitialState {
            state: table.initial().name().to_string(),
        })
    }
}

fn check_duplicates<S: State, P: Measurement>(table: &TransitionTable<S, P>) -> Vec<Check> {
    let entries = table.entries();
    entries
        .iter()
        .enumerate()
        .filter(|(i, entry)| entries[..*i].iter().any(|e| e.state == entry.state))
        .map(|(_, entry)| {
            Validation::fail(ConfigViolation::DuplicateState {
                state: entry.state.name().to_string(),
            })
        })
        .collect()
}

fn check_destinations<S: State, P: Measurement>(table: &TransitionTable<S, P>) -> Vec<Check> {
    table
        .entries()
        .iter()
        .flat_map(|entry| {
            entry
                .transitions
                .iter()
                .filter(|t| !table.contains(&t.to))
                .map(move |t| {
                    Validation::fail(ConfigViolation::UnknownDestination {
                        from: entry.state.name().to_string(),
                        to: t.to.name().to_string(),
                    })
                })
        })
        .collect()
}

/// Breadth-first walk from the initial state. Skipped when the initial state
/// is missing; that is already reported.
fn check_reachability<S: State, P: Measurement>(table: &TransitionTable<S, P>) -> Vec<Check> {
    let Some(start) = table.position(table.initial()) else {
        return Vec::new();
    };

    let entries = table.entries();
    let mut reached = vec![false; entries.len()];
    let mut queue = VecDeque::from([start]);
    reached[start] = true;

    while let Some(index) = queue.pop_front() {
        for transition in &entries[index].transitions {
            if let Some(next) = table.position(&transition.to) {
                if !reached[next] {
                    reached[next] = true;
                    queue.push_back(next);
                }
            }
        }
    }

    // duplicates are reported by check_duplicates
    entries
        .iter()
        .enumerate()
        .filter(|(i, entry)| table.position(&entry.state) == Some(*i) && !reached[*i])
        .map(|(_, entry)| {
            Validation::fail(ConfigViolation::UnreachableState {
                state: entry.state.name().to_string(),
            })
        })
        .collect()
}
