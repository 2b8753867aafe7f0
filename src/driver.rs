//! Poll driver: pulls a reading from a source and feeds it to the machine.
//!
//! Cadence belongs to the caller (a timer tick, a main loop with a delay);
//! one call to [`PollDriver::poll`] is one complete update.

use crate::core::{Measurement, State};
use crate::machine::{MachineError, StateMachine};
use crate::sensor::MeasurementSource;
use std::marker::PhantomData;
use tracing::warn;

pub struct PollDriver<Src, P>
where
    Src: MeasurementSource<P>,
    P: Measurement,
{
    source: Src,
    polls: u64,
    _reading: PhantomData<P>,
}

impl<Src, P> PollDriver<Src, P>
where
    Src: MeasurementSource<P>,
    P: Measurement,
{
    pub fn new(source: Src) -> Self {
        Self {
            source,
            polls: 0,
            _reading: PhantomData,
        }
    }

    /// Read once and update `machine` with the reading.
    ///
    /// Errors are logged and returned; retrying is left to the next tick.
    pub fn poll<S: State>(&mut self, machine: &mut StateMachine<S, P>) -> Result<S, MachineError> {
        let reading = self.source.read();
        self.polls += 1;
        machine.update(reading).inspect_err(|error| {
            warn!(poll = self.polls, reading = ?reading, %error, "state machine update failed");
        })
    }

    /// Number of polls attempted so far.
    pub fn polls(&self) -> u64 {
        self.polls
    }

    pub fn source(&self) -> &Src {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut Src {
        &mut self.source
    }
}
