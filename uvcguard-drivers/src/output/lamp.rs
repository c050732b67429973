//! GPIO lamp output
//!
//! Drives the UV-C lamp (or its MOSFET gate) from one GPIO pin.

use embedded_hal::digital::OutputPin;
use uvcguard_core::traits::LampOutput;

/// GPIO lamp output
///
/// The pin can be configured as active-high (default) or active-low.
pub struct GpioLamp<P> {
    pin: P,
    /// If true, lamp ON = pin LOW
    inverted: bool,
    on: bool,
}

impl<P: OutputPin> GpioLamp<P> {
    /// Create a lamp output, initially off
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin to control
    /// - `inverted`: If true, lamp is ON when pin is LOW
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut lamp = Self {
            pin,
            inverted,
            on: false,
        };
        lamp.set_on(false);
        lamp
    }

    /// Create an active-high lamp output
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Create an active-low lamp output
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }
}

impl<P: OutputPin> LampOutput for GpioLamp<P> {
    fn set_on(&mut self, on: bool) {
        self.on = on;

        if on != self.inverted {
            let _ = self.pin.set_high();
        } else {
            let _ = self.pin.set_low();
        }
    }

    fn is_on(&self) -> bool {
        self.on
    }
}
