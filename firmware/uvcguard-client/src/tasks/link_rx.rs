//! Controller link receive task
//!
//! Forwards raw bytes from UART1 to the unit task, which owns the
//! directive decoder.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use crate::channels::{UnitRequest, REQUEST_CHANNEL};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 16;

/// Link RX task - receives directive bytes from the controller
#[embassy_executor::task]
pub async fn link_rx_task(mut rx: BufferedUartRx) {
    info!("Link RX task started");

    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    REQUEST_CHANNEL.send(UnitRequest::Link(byte)).await;
                }
            }
            Err(e) => {
                warn!("Link read error: {:?}", e);
            }
        }
    }
}
