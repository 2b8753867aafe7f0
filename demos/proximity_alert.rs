//! Proximity Alert
//!
//! This example drives the five-level proximity alert from a replayed
//! sequence of ultrasonic echo captures, as if an object approached the
//! sensor, wobbled around the critical boundary and then backed away.
//!
//! Key concepts:
//! - Echo pulse width converted to whole centimetres
//! - Poll driver feeding one reading per tick
//! - Hysteresis holding a level while the reading wobbles
//! - Indicator outputs driven by entry and transition actions
//!
//! Run with: cargo run --example proximity_alert

use hysteresis_fsm::alert::{self, Indicator};
use hysteresis_fsm::driver::PollDriver;
use hysteresis_fsm::sensor::{EchoRanger, MeasurementSource, ECHO_US_PER_CM};
use hysteresis_fsm::StateMachine;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

// Prints every output change instead of toggling pins.
struct Console;

impl Indicator for Console {
    fn set_red(&self, on: bool) {
        println!("    red   {}", if on { "on" } else { "off" });
    }

    fn set_green(&self, on: bool) {
        println!("    green {}", if on { "on" } else { "off" });
    }

    fn start_blinking(&self) {
        println!("    red   blinking");
    }

    fn stop_blinking(&self) {
        println!("    red   steady");
    }
}

// Replays captured echo widths through the ranger.
struct Bench {
    ranger: EchoRanger,
    echoes_cm: std::vec::IntoIter<u32>,
}

impl MeasurementSource<i32> for Bench {
    fn read(&mut self) -> i32 {
        if let Some(cm) = self.echoes_cm.next() {
            self.ranger.capture(0, cm * ECHO_US_PER_CM);
        }
        self.ranger.whole_centimeters()
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    println!("=== Proximity Alert ===\n");

    let config = alert::config(Arc::new(Console))?;
    let mut machine = StateMachine::new();
    println!("Initializing:");
    machine.initialize(config)?;

    let echoes_cm = vec![45, 35, 29, 31, 25, 19, 21, 15, 11, 9, 7, 9, 7, 6, 9, 11, 16, 24, 40];
    let ticks = echoes_cm.len();
    let mut driver = PollDriver::new(Bench {
        ranger: EchoRanger::new(),
        echoes_cm: echoes_cm.into_iter(),
    });

    for _ in 0..ticks {
        let before = machine.current_state().copied();
        let level = driver.poll(&mut machine)?;
        let distance = driver.source().ranger.whole_centimeters();
        match before {
            Some(before) if before != level => {
                println!("{distance:>3} cm: {before:?} -> {level:?}")
            }
            _ => println!("{distance:>3} cm: {level:?}"),
        }
    }

    if let Some(history) = machine.history() {
        println!("\nPath:");
        for state in history.get_path() {
            println!("  {state:?}");
        }
    }

    Ok(())
}
