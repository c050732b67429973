//! Inter-task communication channels
//!
//! The control task owns every piece of node state. The console tasks
//! talk to it only through these channels.

use core::fmt::Write;

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::String;

use uvcguard_core::console::ServerCommand;

/// Longest console reply
pub const REPLY_LEN: usize = 160;

/// Console reply text
pub type Reply = String<REPLY_LEN>;

/// Channel capacity for console commands
const COMMAND_CHANNEL_SIZE: usize = 4;

/// Channel capacity for console replies
const REPLY_CHANNEL_SIZE: usize = 4;

/// Parsed console commands for the control task
pub static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, ServerCommand, COMMAND_CHANNEL_SIZE> =
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
