//! Buzzer and indicator LED

use embedded_hal::digital::OutputPin;
use uvcguard_core::traits::AlarmOutput;

/// Alarm outputs on two active-high GPIO pins
pub struct GpioAlarm<B, I> {
    buzzer: B,
    indicator: I,
}

impl<B: OutputPin, I: OutputPin> GpioAlarm<B, I> {
    /// Create the outputs, both low
    pub fn new(buzzer: B, indicator: I) -> Self {
        let mut alarm = Self { buzzer, indicator };
        alarm.set_buzzer(false);
        alarm.set_indicator(false);
        alarm
    }
}

impl<B: OutputPin, I: OutputPin> AlarmOutput for GpioAlarm<B, I> {
    fn set_buzzer(&mut self, on: bool) {
        let _ = if on {
            self.buzzer.set_high()
        } else {
            self.buzzer.set_low()
        };
    }

    fn set_indicator(&mut self, on: bool) {
        let _ = if on {
            self.indicator.set_high()
        } else {
            self.indicator.set_low()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    struct MockPin {
        high: bool,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }
    }

    #[test]
    fn test_outputs_follow_calls() {
        let mut alarm = GpioAlarm::new(MockPin { high: true }, MockPin { high: true });
        assert!(!alarm.buzzer.high);
        assert!(!alarm.indicator.high);

        alarm.set_buzzer(true);
        alarm.set_indicator(true);
        assert!(alarm.buzzer.high);
        assert!(alarm.indicator.high);

        alarm.set_buzzer(false);
        assert!(!alarm.buzzer.high);
        assert!(alarm.indicator.high);
    }
}
