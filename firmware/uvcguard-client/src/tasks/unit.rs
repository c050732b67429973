//! Unit task
//!
//! Single owner of the lamp. Multiplexes the overcurrent watchdog, the
//! two alarm toggle periods and incoming requests.

use defmt::*;
use embassy_futures::select::{select4, Either4};
use embassy_time::{Duration, Ticker};

use uvcguard_core::config::ClientConfig;

use crate::channels::REQUEST_CHANNEL;
use crate::controller::Controller;

/// Unit task - interlock, alarm pattern and lamp switching
#[embassy_executor::task]
pub async fn unit_task(mut controller: Controller, config: ClientConfig) {
    info!(
        "Unit task started, watchdog {=u32} ms, buzzer {=u32} ms, indicator {=u32} ms",
        config.control.tick_ms, config.alarm.buzzer_period_ms, config.alarm.indicator_period_ms
    );

    let mut watchdog = Ticker::every(Duration::from_millis(config.control.tick_ms as u64));
    let mut buzzer = Ticker::every(Duration::from_millis(config.alarm.buzzer_period_ms as u64));
    let mut indicator = Ticker::every(Duration::from_millis(config.alarm.indicator_period_ms as u64));

    loop {
        match select4(
            watchdog.next(),
            buzzer.next(),
            indicator.next(),
            REQUEST_CHANNEL.receive(),
        )
        .await
        {
            Either4::First(()) => controller.watchdog(),
            Either4::Second(()) => controller.on_buzzer_period(),
            Either4::Third(()) => controller.on_indicator_period(),
            Either4::Fourth(request) => controller.handle(request),
        }
    }
}
