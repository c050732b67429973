//! Exposed-unit node logic
//!
//! Owns the lamp, the alarm outputs, the current sensor and the link
//! decoder. The unit task drives it from its tickers and from incoming
//! requests.

use defmt::*;
use embassy_rp::gpio::Output;

use uvcguard_core::console::ClientCommand;
use uvcguard_core::safety::{ExposedUnit, InterlockStatus};
use uvcguard_drivers::output::{GpioAlarm, GpioLamp};
use uvcguard_drivers::sensor::ThresholdSensor;
use uvcguard_hal_rp2040::AdcSampler;
use uvcguard_protocol::{Directive, DirectiveError, DirectiveReceiver};

use crate::channels::{reply, UnitRequest};

/// Lamp, buzzer and indicator on the board's GPIOs
pub type Unit = ExposedUnit<GpioLamp<Output<'static>>, GpioAlarm<Output<'static>, Output<'static>>>;

/// Lamp current sense on ADC1
pub type CurrentSensor = ThresholdSensor<AdcSampler<'static>>;

/// Exposed-unit node state
pub struct Controller {
    unit: Unit,
    current: CurrentSensor,
    link: DirectiveReceiver,
}

impl Controller {
    pub fn new(unit: Unit, current: CurrentSensor) -> Self {
        Self {
            unit,
            current,
            link: DirectiveReceiver::new(),
        }
    }

    /// Periodic overcurrent check
    pub fn watchdog(&mut self) {
        let sample = self.current.read();

        match self.unit.watchdog(sample) {
            Ok(InterlockStatus::Tripped) => {
                error!(
                    "OVERCURRENT DETECTED: raw {=u16}, UV-C lamp latched off",
                    self.current.last_raw().unwrap_or(0)
                );
                reply(format_args!("Over-current detected. UV LED disabled for safety."));
            }
            Ok(InterlockStatus::Latched) | Ok(InterlockStatus::Ok) => {}
            Err(e) => warn!("Current sample failed: {:?}", e),
        }
    }

    pub fn on_buzzer_period(&mut self) {
        self.unit.on_buzzer_period();
    }

    pub fn on_indicator_period(&mut self) {
        self.unit.on_indicator_period();
    }

    /// Apply a link byte or a console command
    pub fn handle(&mut self, request: UnitRequest) {
        match request {
            UnitRequest::Link(byte) => match self.link.feed(byte) {
                Ok(Some(directive)) => self.apply_link(directive),
                Ok(None) => {}
                Err(DirectiveError::UnknownByte(b)) => {
                    warn!(
                        "Discarding unknown link byte {=u8:#x} ({=u32} rejected)",
                        b,
                        self.link.rejected()
                    );
                }
            },
            UnitRequest::Console(ClientCommand::Led(directive)) => match self.unit.handle(directive) {
                Ok(()) => {
                    info!("Console {:?}: UV-C lamp {}", directive, on_off(self.unit.lamp_on()));
                    reply(format_args!(
                        "UV LED {}.",
                        if directive == Directive::Illuminate { "on" } else { "off" }
                    ));
                }
                Err(e) => reply(format_args!("{}", e.message())),
            },
            UnitRequest::Console(ClientCommand::Status) => {
                let last = match self.link.last() {
                    Some(Directive::Illuminate) => "on",
                    Some(Directive::Extinguish) => "off",
                    None => "none",
                };
                reply(format_args!(
                    "Lamp {}, interlock {}, alarm {:?}, current raw {}, last link {}, link noise {}",
                    on_off(self.unit.lamp_on()),
                    if self.unit.is_latched() { "LATCHED" } else { "ok" },
                    self.unit.alarm_mode(),
                    self.current.last_raw().unwrap_or(0),
                    last,
                    self.link.rejected()
                ));
            }
            UnitRequest::Console(ClientCommand::Help) => {
                reply(format_args!("{}", uvcguard_core::console::CLIENT_HELP));
            }
        }
    }

    fn apply_link(&mut self, directive: Directive) {
        let was_on = self.unit.lamp_on();
        match self.unit.handle(directive) {
            Ok(()) if was_on != self.unit.lamp_on() => {
                info!("Link {:?}: UV-C lamp {}", directive, on_off(self.unit.lamp_on()));
            }
            Ok(()) => {}
            Err(e) => warn!("Link {:?} refused: {:?}", directive, e),
        }
    }
}

fn on_off(on: bool) -> &'static str {
    if on {
        "on"
    } else {
        "off"
    }
}
