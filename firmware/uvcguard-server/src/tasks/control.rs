//! Control task
//!
//! Runs the exposure tick on a fixed period and executes console
//! commands between ticks.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Ticker};

use crate::channels::COMMAND_CHANNEL;
use crate::controller::Controller;

/// Control task - owns all controller node state
#[embassy_executor::task]
pub async fn control_task(mut controller: Controller, tick_ms: u32) {
    info!("Control task started, tick {=u32} ms", tick_ms);

    let mut ticker = Ticker::every(Duration::from_millis(tick_ms as u64));

    loop {
        match select(ticker.next(), COMMAND_CHANNEL.receive()).await {
            Either::First(()) => controller.tick(),
            Either::Second(command) => controller.handle(command),
        }
    }
}
