//! Measurement sources feeding the machine.
//!
//! The machine only needs "the latest reading"; how it is captured is the
//! source's business. [`EchoRanger`] covers the ultrasonic case, where a
//! timer captures the rising and falling edge of the echo pulse and the
//! pulse width converts to a distance.

use crate::core::Measurement;
use std::collections::VecDeque;

/// Echo pulse width, in microseconds, per centimetre of distance (the round
/// trip at the speed of sound).
pub const ECHO_US_PER_CM: u32 = 58;

/// Anything that can hand out its most recent reading on demand.
pub trait MeasurementSource<P: Measurement> {
    fn read(&mut self) -> P;
}

/// Ultrasonic ranger fed by timer input captures.
///
/// Reads 0 until the first capture arrives.
///
/// # Example
///
/// ```rust
/// use hysteresis_fsm::sensor::{EchoRanger, MeasurementSource};
///
/// let mut ranger = EchoRanger::new();
/// assert_eq!(MeasurementSource::<i32>::read(&mut ranger), 0);
///
/// ranger.capture(1_000, 2_740);
/// assert_eq!(ranger.echo_us(), 1_740);
/// assert_eq!(MeasurementSource::<i32>::read(&mut ranger), 30);
/// ```
#[derive(Clone, Debug, Default)]
pub struct EchoRanger {
    last_echo_us: u32,
}

impl EchoRanger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one echo from the timer ticks at its rising and falling edge.
    /// The timer is free-running, so a falling edge after counter overflow
    /// still yields the right width.
    pub fn capture(&mut self, rising_us: u32, falling_us: u32) {
        self.last_echo_us = falling_us.wrapping_sub(rising_us);
    }

    pub fn echo_us(&self) -> u32 {
        self.last_echo_us
    }

    pub fn centimeters(&self) -> f32 {
        self.last_echo_us as f32 / ECHO_US_PER_CM as f32
    }

    /// Whole centimetres, truncated.
    pub fn whole_centimeters(&self) -> i32 {
        // u32::MAX / 58 fits in i32
        (self.last_echo_us / ECHO_US_PER_CM) as i32
    }
}

impl MeasurementSource<i32> for EchoRanger {
    fn read(&mut self) -> i32 {
        self.whole_centimeters()
    }
}

impl MeasurementSource<f32> for EchoRanger {
    fn read(&mut self) -> f32 {
        self.centimeters()
    }
}

/// Plays back a fixed sequence of readings, then keeps repeating the last
/// one. Useful for bench runs and tests.
#[derive(Clone, Debug)]
pub struct Replay<P: Measurement> {
    pending: VecDeque<P>,
    last: P,
}

impl<P: Measurement> Replay<P> {
    /// `initial` is returned if the sequence is empty.
    pub fn new(initial: P, readings: impl IntoIterator<Item = P>) -> Self {
        Self {
            pending: readings.into_iter().collect(),
            last: initial,
        }
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl<P: Measurement> MeasurementSource<P> for Replay<P> {
    fn read(&mut self) -> P {
        if let Some(next) = self.pending.pop_front() {
            self.last = next;
        }
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranger_reads_zero_before_first_capture() {
        let ranger = EchoRanger::new();
        assert_eq!(ranger.whole_centimeters(), 0);
        assert_eq!(ranger.centimeters(), 0.0);
    }

    #[test]
    fn ranger_converts_echo_width_to_distance() {
        let mut ranger = EchoRanger::new();
        ranger.capture(500, 500 + 58 * 12 + 57);

        assert_eq!(ranger.whole_centimeters(), 12);
        assert!((ranger.centimeters() - 12.98).abs() < 0.01);
    }

    #[test]
    fn ranger_handles_counter_overflow() {
        let mut ranger = EchoRanger::new();
        ranger.capture(u32::MAX - 99, 480);

        assert_eq!(ranger.echo_us(), 580);
        assert_eq!(ranger.whole_centimeters(), 10);
    }

    #[test]
    fn latest_capture_wins() {
        let mut ranger = EchoRanger::new();
        ranger.capture(0, 58 * 40);
        ranger.capture(0, 58 * 7);

        assert_eq!(MeasurementSource::<i32>::read(&mut ranger), 7);
        assert_eq!(MeasurementSource::<f32>::read(&mut ranger), 7.0);
    }

    #[test]
    fn replay_repeats_last_reading() {
        let mut replay = Replay::new(0, [35, 29]);

        assert_eq!(replay.read(), 35);
        assert_eq!(replay.read(), 29);
        assert_eq!(replay.read(), 29);
        assert_eq!(replay.remaining(), 0);
    }

    #[test]
    fn empty_replay_returns_initial() {
        let mut replay: Replay<i32> = Replay::new(-1, []);
        assert_eq!(replay.read(), -1);
    }
}
