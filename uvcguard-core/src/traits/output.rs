//! Actuator and link traits

use uvcguard_protocol::Directive;

/// UV-C lamp output control
///
/// Implementations drive the lamp via a GPIO pin, MOSFET or relay.
pub trait LampOutput {
    /// Turn the lamp on or off
    fn set_on(&mut self, on: bool);

    /// Check if the lamp is currently on
    fn is_on(&self) -> bool;
}

/// Audible and visual alarm outputs
pub trait AlarmOutput {
    /// Drive the buzzer
    fn set_buzzer(&mut self, on: bool);

    /// Drive the indicator LED
    fn set_indicator(&mut self, on: bool);
}

/// Outbound directive channel
///
/// Delivery is best-effort. Implementations report transport failures
/// through logging only; callers never change state based on the send.
pub trait DirectiveSink {
    /// Send one directive
    fn send(&mut self, directive: Directive);
}
