//! Inter-task communication channels
//!
//! Link bytes and console commands both funnel into the unit task,
//! which decodes directives and is the only writer of the lamp and
//! alarm outputs.

use core::fmt::Write;

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::String;

use uvcguard_core::console::ClientCommand;

/// Longest console reply
pub const REPLY_LEN: usize = 128;

/// Console reply text
pub type Reply = String<REPLY_LEN>;

/// Channel capacity for unit requests
const REQUEST_CHANNEL_SIZE: usize = 8;

/// Channel capacity for console replies
const REPLY_CHANNEL_SIZE: usize = 4;

/// Work for the unit task
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UnitRequest {
    /// Raw byte received from the controller link
    Link(u8),
    /// Operator command from the console
    Console(ClientCommand),
}

/// Requests for the unit task
pub static REQUEST_CHANNEL: Channel<CriticalSectionRawMutex, UnitRequest, REQUEST_CHANNEL_SIZE> =
    Channel::new();

/// Reply lines for the console transmitter
pub static REPLY_CHANNEL: Channel<CriticalSectionRawMutex, Reply, REPLY_CHANNEL_SIZE> = Channel::new();

/// Queue a reply, dropping it if the console is backed up
pub fn reply(args: core::fmt::Arguments) {
    let mut text = Reply::new();
    // Overlong replies are truncated
    let _ = text.write_fmt(args);
    if REPLY_CHANNEL.try_send(text).is_err() {
        warn!("Reply channel full, dropping reply");
    }
}
