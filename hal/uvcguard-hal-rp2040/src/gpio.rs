//! Bidirectional GPIO

use core::convert::Infallible;

use embassy_rp::gpio::{Flex, Pull};
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use uvcguard_drivers::rtc::DataLine;

/// RTC data line on a flexible GPIO
///
/// Starts as a low output. The pin is released without pulls when
/// switched to input; the DS1302 I/O pin has its own pull-down.
pub struct FlexDataLine<'d> {
    pin: Flex<'d>,
}

impl<'d> FlexDataLine<'d> {
    pub fn new(mut pin: Flex<'d>) -> Self {
        pin.set_pull(Pull::None);
        pin.set_low();
        pin.set_as_output();
        Self { pin }
    }
}

impl ErrorType for FlexDataLine<'_> {
    type Error = Infallible;
}

impl OutputPin for FlexDataLine<'_> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.pin.set_low();
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.pin.set_high();
        Ok(())
    }
}

impl InputPin for FlexDataLine<'_> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.pin.is_high())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.pin.is_low())
    }
}

impl DataLine for FlexDataLine<'_> {
    fn set_as_input(&mut self) {
        self.pin.set_as_input();
    }

    fn set_as_output(&mut self) {
        self.pin.set_as_output();
    }
}
