//! Proximity alert: the reference deployment of the engine.
//!
//! An ultrasonic distance reading (whole centimetres) is classified into five
//! alert levels. Two indicator outputs show the level:
//!
//! | Level         | Distance      | Red      | Green |
//! |---------------|---------------|----------|-------|
//! | NoAlert       | > 30 cm       | off      | off   |
//! | LowAlert      | 30 to 20 cm   | off      | on    |
//! | MediumAlert   | 20 to 12 cm   | on       | on    |
//! | HighAlert     | 12 to 8 cm    | on       | off   |
//! | CriticalAlert | <= 8 cm       | blinking | off   |
//!
//! Each boundary carries a 2 cm hysteresis band. Blinking starts the first
//! time the critical state re-selects its own `<= 8` transition and stops
//! when the reading leaves the critical band.

use crate::builder::{BuildError, TableBuilder};
use crate::config::MachineConfig;
use crate::core::Comparison::{GreaterThan, LessOrEqual};
use crate::state_enum;
use crate::table::TransitionTable;
use std::sync::Arc;

state_enum! {
    /// Alert levels, nearest last.
    pub enum AlertLevel {
        NoAlert,
        LowAlert,
        MediumAlert,
        HighAlert,
        CriticalAlert,
    }
}

pub const HYSTERESIS_CM: i32 = 2;
pub const LOW_ALERT_CM: i32 = 30;
pub const MEDIUM_ALERT_CM: i32 = 20;
pub const HIGH_ALERT_CM: i32 = 12;
pub const CRITICAL_ALERT_CM: i32 = 8;

/// The outputs the alert levels drive.
///
/// Blinking is expected to run on its own (a hardware timer toggling the red
/// output), independent of the polling cadence.
pub trait Indicator: Send + Sync {
    fn set_red(&self, on: bool);
    fn set_green(&self, on: bool);
    fn start_blinking(&self);
    fn stop_blinking(&self);
}

/// The five-level alert table wired to `indicator`.
pub fn table(
    indicator: Arc<dyn Indicator>,
) -> Result<TransitionTable<AlertLevel, i32>, BuildError> {
    let lights = |red: bool, green: bool| {
        let indicator = Arc::clone(&indicator);
        move || {
            indicator.set_red(red);
            indicator.set_green(green);
        }
    };
    let blink_on = {
        let indicator = Arc::clone(&indicator);
        move || indicator.start_blinking()
    };
    let blink_off = {
        let indicator = Arc::clone(&indicator);
        move || indicator.stop_blinking()
    };
    let green_off = {
        let indicator = Arc::clone(&indicator);
        move || indicator.set_green(false)
    };

    TableBuilder::new()
        .initial(AlertLevel::NoAlert)
        .state(AlertLevel::NoAlert, |s| {
            s.on_entry(lights(false, false))
                .when(LessOrEqual, LOW_ALERT_CM, AlertLevel::LowAlert)
        })
        .state(AlertLevel::LowAlert, |s| {
            s.on_entry(lights(false, true))
                .when(GreaterThan, LOW_ALERT_CM, AlertLevel::NoAlert)
                .when(LessOrEqual, MEDIUM_ALERT_CM, AlertLevel::MediumAlert)
        })
        .state(AlertLevel::MediumAlert, |s| {
            s.on_entry(lights(true, true))
                .when(GreaterThan, MEDIUM_ALERT_CM, AlertLevel::LowAlert)
                .when(LessOrEqual, HIGH_ALERT_CM, AlertLevel::HighAlert)
        })
        .state(AlertLevel::HighAlert, |s| {
            s.on_entry(lights(true, false))
                .when(GreaterThan, HIGH_ALERT_CM, AlertLevel::MediumAlert)
                .when(LessOrEqual, CRITICAL_ALERT_CM, AlertLevel::CriticalAlert)
        })
        .state(AlertLevel::CriticalAlert, |s| {
            s.on_entry(green_off)
                .when_then(GreaterThan, CRITICAL_ALERT_CM, AlertLevel::HighAlert, blink_off)
                .when_then(LessOrEqual, CRITICAL_ALERT_CM, AlertLevel::CriticalAlert, blink_on)
        })
        .build()
}

/// Alert table plus the 2 cm hysteresis margin.
pub fn config(
    indicator: Arc<dyn Indicator>,
) -> Result<MachineConfig<AlertLevel, i32>, BuildError> {
    Ok(MachineConfig::new(table(indicator)?, HYSTERESIS_CM))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::State;
    use crate::machine::StateMachine;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Panel {
        red: Mutex<bool>,
        green: Mutex<bool>,
        blinking: Mutex<bool>,
    }

    impl Panel {
        fn lights(&self) -> (bool, bool, bool) {
            (
                *self.red.lock().unwrap(),
                *self.green.lock().unwrap(),
                *self.blinking.lock().unwrap(),
            )
        }
    }

    impl Indicator for Panel {
        fn set_red(&self, on: bool) {
            *self.red.lock().unwrap() = on;
        }

        fn set_green(&self, on: bool) {
            *self.green.lock().unwrap() = on;
        }

        fn start_blinking(&self) {
            *self.blinking.lock().unwrap() = true;
        }

        fn stop_blinking(&self) {
            *self.blinking.lock().unwrap() = false;
        }
    }

    fn machine() -> (Arc<Panel>, StateMachine<AlertLevel, i32>) {
        let panel = Arc::new(Panel::default());
        let config = config(panel.clone()).unwrap();
        (panel, StateMachine::start(config).unwrap())
    }

    #[test]
    fn table_is_valid() {
        let panel: Arc<dyn Indicator> = Arc::new(Panel::default());
        let config = config(panel).unwrap();

        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.hysteresis_margin, 2);
        assert_eq!(config.table.len(), 5);
    }

    #[test]
    fn level_names() {
        assert_eq!(AlertLevel::NoAlert.name(), "NoAlert");
        assert_eq!(AlertLevel::CriticalAlert.name(), "CriticalAlert");
    }

    #[test]
    fn lights_follow_levels() {
        let (panel, mut machine) = machine();
        assert_eq!(panel.lights(), (false, false, false));

        machine.update(25).unwrap();
        assert_eq!(panel.lights(), (false, true, false));

        machine.update(15).unwrap();
        assert_eq!(panel.lights(), (true, true, false));

        machine.update(10).unwrap();
        assert_eq!(panel.lights(), (true, false, false));
    }

    #[test]
    fn critical_blinks_on_reselection_and_stops_on_exit() {
        let (panel, mut machine) = machine();
        for reading in [25, 15, 10, 7] {
            machine.update(reading).unwrap();
        }
        assert_eq!(machine.current_state(), Some(&AlertLevel::CriticalAlert));
        assert!(!panel.lights().2);

        machine.update(6).unwrap();
        assert!(!panel.lights().1);
        assert!(panel.lights().2);

        assert_eq!(machine.update(11), Ok(AlertLevel::HighAlert));
        assert_eq!(panel.lights(), (true, false, false));
    }
}
