//! Controller node logic
//!
//! Owns the clock, the presence sensor, the exposure scheduler and the
//! link to the exposed unit. The control task drives it with ticks and
//! console commands; nothing in here awaits.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_rp::uart::BufferedUartTx;
use embassy_time::Delay;

use uvcguard_core::clock::{Clock, ClockError, HourFormat, RegisterField};
use uvcguard_core::config::ServerConfig;
use uvcguard_core::console::ServerCommand;
use uvcguard_core::scheduler::{ExposureFacts, ExposureRefusal, ExposureScheduler};
use uvcguard_core::traits::LampOutput;
use uvcguard_core::Directive;
use uvcguard_drivers::link::SerialLink;
use uvcguard_drivers::output::GpioLamp;
use uvcguard_drivers::rtc::Ds1302;
use uvcguard_drivers::sensor::ThresholdSensor;
use uvcguard_hal_rp2040::{AdcSampler, FlexDataLine};

use crate::channels::reply;

/// DS1302 on the board's CE, SCLK and I/O pins
pub type ServerRtc = Ds1302<Output<'static>, Output<'static>, FlexDataLine<'static>, Delay>;

/// Radar presence sensor on ADC1
pub type PresenceSensor = ThresholdSensor<AdcSampler<'static>>;

/// Directive link on UART1
pub type Link = SerialLink<BufferedUartTx>;

/// Controller node state
pub struct Controller {
    clock: Clock<ServerRtc>,
    presence: PresenceSensor,
    scheduler: ExposureScheduler,
    link: Link,
    /// On-board LED mirroring the believed lamp state
    status_led: GpioLamp<Output<'static>>,
}

impl Controller {
    pub fn new(
        rtc: ServerRtc,
        presence: PresenceSensor,
        link: Link,
        status_led: Output<'static>,
        config: &ServerConfig,
    ) -> Self {
        let mut clock = Clock::new(rtc);

        clock.set_write_protect(false);
        if clock.is_halted() {
            warn!("RTC oscillator halted; set the time with 'set second <n>'");
        }

        let time = clock.refresh_all();
        info!(
            "RTC time {=u8}:{=u8}:{=u8} ({:?})",
            time.hour, time.minute, time.second, time.format
        );

        let window = config.schedule.window();
        info!(
            "Exposure window after {=u8}:59 and before {=u8}:00, cap {=u16} min",
            window.start_hour, window.end_hour, config.schedule.duration_minutes
        );

        Self {
            clock,
            presence,
            scheduler: ExposureScheduler::new(&config.schedule),
            link,
            status_led: GpioLamp::new_active_high(status_led),
        }
    }

    /// One control tick
    pub fn tick(&mut self) {
        self.clock.refresh_field(RegisterField::Hour);
        let hour = self.clock.time().hour_24();

        let person_present = match self.presence.read() {
            Ok(present) => present,
            Err(e) => {
                warn!("Presence sample failed: {:?}, holding lamp off", e);
                true
            }
        };

        let previous = self.scheduler.phase();
        let phase = self.scheduler.tick(
            ExposureFacts {
                hour,
                person_present,
                overcurrent: false,
            },
            &mut self.link,
        );

        if phase != previous {
            info!("Exposure {:?} -> {:?} at hour {=u8}", previous, phase, hour);
        }

        self.update_status_led();
    }

    /// Execute one console command and reply
    pub fn handle(&mut self, command: ServerCommand) {
        match command {
            ServerCommand::Uvc(Directive::Illuminate) => {
                match self.scheduler.force_illuminate(&mut self.link) {
                    Ok(()) => {
                        info!("UV-C lamp forced on");
                        reply(format_args!("UV-C lamp on."));
                    }
                    Err(ExposureRefusal::PersonPresent) => {
                        reply(format_args!("Refused: a person is present."));
                    }
                    Err(ExposureRefusal::Lockout) => {
                        reply(format_args!("Refused: overcurrent lockout."));
                    }
                }
            }
            ServerCommand::Uvc(Directive::Extinguish) => {
                self.scheduler.force_extinguish(&mut self.link);
                info!("UV-C lamp forced off");
                reply(format_args!("UV-C lamp off."));
            }
            ServerCommand::Time => self.print_time(),
            ServerCommand::Presence => {
                let state = self.scheduler.state();
                let text = if state.person_present() {
                    "A person is present"
                } else {
                    "A person is not present"
                };
                match self.presence.last_raw() {
                    Some(raw) => reply(format_args!(
                        "{} (raw {}, threshold {})",
                        text,
                        raw,
                        self.presence.threshold().raw()
                    )),
                    None => reply(format_args!("{} (no sample yet)", text)),
                }
            }
            ServerCommand::Status => {
                let state = self.scheduler.state();
                reply(format_args!(
                    "Phase {:?}, lamp {}, elapsed {} s, remaining {} s, cycle complete {}, link sent {} failed {}",
                    self.scheduler.phase(),
                    if state.lamp_on() { "on" } else { "off" },
                    state.elapsed_s(),
                    self.scheduler.remaining_s(),
                    state.cycle_complete(),
                    self.link.sent(),
                    self.link.failed()
                ));
            }
            ServerCommand::Set { field, value } => match self.clock.commit_field(field, value) {
                Ok(()) => {
                    info!("RTC {} set to {=u8}", field.name(), value);
                    reply(format_args!("{} set to {}.", field.name(), value));
                }
                Err(ClockError::ValueOutOfRange { field, value }) => {
                    let range = field.range(self.clock.time().format);
                    reply(format_args!(
                        "{} out of range for {} ({}-{}).",
                        value,
                        field.name(),
                        range.start(),
                        range.end()
                    ));
                }
            },
            ServerCommand::Format(format) => {
                let name = match format {
                    HourFormat::H24 => "24-hour",
                    HourFormat::Am => "12-hour AM",
                    HourFormat::Pm => "12-hour PM",
                };
                match self.clock.set_hour_format(format) {
                    Ok(()) => {
                        let hour = self.clock.time().hour;
                        info!("RTC hour format {}, hour {=u8}", name, hour);
                        reply(format_args!("Hour format {}, hour is now {}.", name, hour));
                    }
                    Err(ClockError::ValueOutOfRange { value, .. }) => {
                        warn!("RTC hour {=u8} not convertible to {}", value, name);
                        reply(format_args!("Hour register unreadable, format unchanged."));
                    }
                }
            }
            ServerCommand::Help => reply(format_args!("{}", uvcguard_core::console::SERVER_HELP)),
        }

        self.update_status_led();
    }

    fn print_time(&mut self) {
        let time = *self.clock.refresh_all();
        let in_window = self.scheduler.window_contains(time.hour_24());
        let suffix = match time.format {
            HourFormat::H24 => "",
            HourFormat::Am => " AM",
            HourFormat::Pm => " PM",
        };

        reply(format_args!(
            "Is it time: {}. The current time is: {:02}:{:02}:{:02}{} 20{:02}-{:02}-{:02} (weekday {})",
            if in_window { "yes" } else { "no" },
            time.hour,
            time.minute,
            time.second,
            suffix,
            time.year,
            time.month,
            time.date,
            time.weekday
        ));
    }

    fn update_status_led(&mut self) {
        let on = self.scheduler.state().lamp_on();
        if self.status_led.is_on() != on {
            self.status_led.set_on(on);
        }
    }
}
