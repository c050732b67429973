//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod console;
pub mod link_rx;
pub mod unit;

pub use console::{console_rx_task, console_tx_task};
pub use link_rx::link_rx_task;
pub use unit::unit_task;
