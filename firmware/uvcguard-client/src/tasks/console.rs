//! Operator console over UART0
//!
//! The receive task assembles lines and parses them; usage errors are
//! answered directly and valid commands go to the unit task. The
//! transmit task writes every queued reply.

use defmt::*;
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embedded_io_async::{Read, Write};

use uvcguard_core::console::{parse_client, ConsoleError, LineBuffer};

use crate::channels::{reply, UnitRequest, REPLY_CHANNEL, REQUEST_CHANNEL};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 32;

/// Console RX task - parses operator command lines
#[embassy_executor::task]
pub async fn console_rx_task(mut rx: BufferedUartRx) {
    info!("Console RX task started");

    let mut lines = LineBuffer::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) => {
                for &byte in &buf[..n] {
                    match lines.feed(byte) {
                        Ok(Some(line)) => handle_line(&line).await,
                        Ok(None) => {}
                        Err(e) => report(e),
                    }
                }
            }
            Err(e) => {
                warn!("Console read error: {:?}", e);
            }
        }
    }
}

async fn handle_line(line: &str) {
    match parse_client(line) {
        Ok(command) => {
            debug!("Console command: {:?}", command);
            REQUEST_CHANNEL.send(UnitRequest::Console(command)).await;
        }
        Err(ConsoleError::Empty) => {}
        Err(e) => report(e),
    }
}

fn report(e: ConsoleError) {
    match e.usage() {
        Some(usage) => reply(format_args!("{} {}", e.message(), usage)),
        None => reply(format_args!("{}", e.message())),
    }
}

/// Console TX task - writes replies
#[embassy_executor::task]
pub async fn console_tx_task(mut tx: BufferedUartTx) {
    info!("Console TX task started");

    loop {
        let text = REPLY_CHANNEL.receive().await;

        let result = async {
            tx.write_all(text.as_bytes()).await?;
            tx.write_all(b"\r\n").await
        }
        .await;

        if let Err(e) = result {
            warn!("Console write error: {:?}", e);
        }
    }
}
