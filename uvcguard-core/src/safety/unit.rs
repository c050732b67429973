//! Exposed-unit lamp controller
//!
//! Ties the interlock, the lamp output and the alarm pattern together.
//! Every path that turns the lamp on or off goes through here, so the
//! alarm always follows the real lamp state.

use uvcguard_protocol::Directive;

use super::alarm::{Alarm, AlarmMode};
use super::interlock::{Interlock, InterlockError, InterlockStatus};
use crate::traits::{AlarmOutput, LampOutput, SensorError};

/// Lamp, alarm and interlock of the exposed unit
pub struct ExposedUnit<L, A> {
    lamp: L,
    outputs: A,
    interlock: Interlock,
    alarm: Alarm,
}

impl<L: LampOutput, A: AlarmOutput> ExposedUnit<L, A> {
    /// Create the unit with the lamp off and the alarm silent
    pub fn new(mut lamp: L, mut outputs: A) -> Self {
        lamp.set_on(false);
        let mut alarm = Alarm::new();
        alarm.stop(&mut outputs);
        Self {
            lamp,
            outputs,
            interlock: Interlock::new(),
            alarm,
        }
    }

    /// Periodic overcurrent check
    ///
    /// A failed sample carries no information: nothing changes and the
    /// error is handed back for logging.
    pub fn watchdog(&mut self, overcurrent: Result<bool, SensorError>) -> Result<InterlockStatus, SensorError> {
        let overcurrent = overcurrent?;
        let status = self.interlock.check(overcurrent, &mut self.lamp);
        if overcurrent {
            self.alarm.panic(&mut self.outputs);
        }
        Ok(status)
    }

    /// Apply a directive from the link or the console
    pub fn handle(&mut self, directive: Directive) -> Result<(), InterlockError> {
        let result = self.interlock.apply(directive, &mut self.lamp);
        if self.lamp.is_on() {
            self.alarm.start();
        } else {
            self.alarm.stop(&mut self.outputs);
        }
        result
    }

    /// Buzzer toggle period elapsed
    pub fn on_buzzer_period(&mut self) {
        self.alarm.on_buzzer_period(&mut self.outputs);
    }

    /// Indicator toggle period elapsed
    pub fn on_indicator_period(&mut self) {
        self.alarm.on_indicator_period(&mut self.outputs);
    }

    /// Check if the lamp is on
    pub fn lamp_on(&self) -> bool {
        self.lamp.is_on()
    }

    /// Check if the interlock has latched
    pub fn is_latched(&self) -> bool {
        self.interlock.is_latched()
    }

    /// Current alarm mode
    pub fn alarm_mode(&self) -> AlarmMode {
        self.alarm.mode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockLamp(bool);

    impl LampOutput for MockLamp {
        fn set_on(&mut self, on: bool) {
            self.0 = on;
        }

        fn is_on(&self) -> bool {
            self.0
        }
    }

    #[derive(Default)]
    struct MockAlarm {
        buzzer: bool,
        indicator: bool,
    }

    impl AlarmOutput for MockAlarm {
        fn set_buzzer(&mut self, on: bool) {
            self.buzzer = on;
        }

        fn set_indicator(&mut self, on: bool) {
            self.indicator = on;
        }
    }

    fn unit() -> ExposedUnit<MockLamp, MockAlarm> {
        ExposedUnit::new(MockLamp(true), MockAlarm::default())
    }

    #[test]
    fn test_starts_dark() {
        let u = unit();
        assert!(!u.lamp_on());
        assert_eq!(u.alarm_mode(), AlarmMode::Silent);
    }

    #[test]
    fn test_alarm_follows_lamp() {
        let mut u = unit();
        u.handle(Directive::Illuminate).unwrap();
        assert!(u.lamp_on());
        assert_eq!(u.alarm_mode(), AlarmMode::Active);

        u.on_buzzer_period();
        assert!(u.outputs.buzzer);

        u.handle(Directive::Extinguish).unwrap();
        assert_eq!(u.alarm_mode(), AlarmMode::Silent);
        assert!(!u.outputs.buzzer);
    }

    #[test]
    fn test_overcurrent_trips_and_refuses() {
        let mut u = unit();
        u.handle(Directive::Illuminate).unwrap();

        assert_eq!(u.watchdog(Ok(true)), Ok(InterlockStatus::Tripped));
        assert!(!u.lamp_on());
        assert!(u.is_latched());
        assert_eq!(u.alarm_mode(), AlarmMode::Panic);
        assert!(u.outputs.indicator);

        assert_eq!(u.handle(Directive::Illuminate), Err(InterlockError::Latched));
        assert!(!u.lamp_on());
        assert!(u.outputs.indicator);
        assert_eq!(u.watchdog(Ok(false)), Ok(InterlockStatus::Latched));
    }

    #[test]
    fn test_failed_sample_changes_nothing() {
        let mut u = unit();
        u.handle(Directive::Illuminate).unwrap();

        assert_eq!(
            u.watchdog(Err(SensorError::ConversionError)),
            Err(SensorError::ConversionError)
        );
        assert!(u.lamp_on());
        assert!(!u.is_latched());
    }
}
