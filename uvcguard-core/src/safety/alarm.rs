//! Buzzer and indicator pattern
//!
//! While the lamp is lit the buzzer and the indicator LED toggle on
//! their own periods. After an overcurrent trip the indicator is held
//! solid and the buzzer is silenced. The pattern is cosmetic and takes
//! no part in the interlock decision.

use crate::traits::AlarmOutput;

/// Alarm mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmMode {
    /// Outputs low
    Silent,
    /// Toggling while the lamp is lit
    Active,
    /// Indicator solid after an overcurrent trip
    Panic,
}

/// Alarm toggler state
#[derive(Debug, Clone)]
pub struct Alarm {
    mode: AlarmMode,
    buzzer_on: bool,
    indicator_on: bool,
}

impl Default for Alarm {
    fn default() -> Self {
        Self::new()
    }
}

impl Alarm {
    /// Create a silent alarm
    pub const fn new() -> Self {
        Self {
            mode: AlarmMode::Silent,
            buzzer_on: false,
            indicator_on: false,
        }
    }

    /// Start toggling (lamp switched on)
    ///
    /// Ignored after a panic.
    pub fn start(&mut self) {
        if self.mode == AlarmMode::Silent {
            self.mode = AlarmMode::Active;
        }
    }

    /// Stop toggling and drive both outputs low (lamp switched off)
    ///
    /// The solid indicator of a panic is left alone.
    pub fn stop<A: AlarmOutput>(&mut self, out: &mut A) {
        if self.mode == AlarmMode::Panic {
            return;
        }
        self.mode = AlarmMode::Silent;
        self.set_buzzer(out, false);
        self.set_indicator(out, false);
    }

    /// Silence the buzzer and hold the indicator on
    pub fn panic<A: AlarmOutput>(&mut self, out: &mut A) {
        self.mode = AlarmMode::Panic;
        self.set_buzzer(out, false);
        self.set_indicator(out, true);
    }

    /// Buzzer period elapsed
    pub fn on_buzzer_period<A: AlarmOutput>(&mut self, out: &mut A) {
        if self.mode == AlarmMode::Active {
            let next = !self.buzzer_on;
            self.set_buzzer(out, next);
        }
    }

    /// Indicator period elapsed
    pub fn on_indicator_period<A: AlarmOutput>(&mut self, out: &mut A) {
        if self.mode == AlarmMode::Active {
            let next = !self.indicator_on;
            self.set_indicator(out, next);
        }
    }

    /// Current mode
    pub fn mode(&self) -> AlarmMode {
        self.mode
    }

    fn set_buzzer<A: AlarmOutput>(&mut self, out: &mut A, on: bool) {
        self.buzzer_on = on;
        out.set_buzzer(on);
    }

    fn set_indicator<A: AlarmOutput>(&mut self, out: &mut A, on: bool) {
        self.indicator_on = on;
        out.set_indicator(on);
    }
}
