//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod console;
pub mod control;

pub use console::{console_rx_task, console_tx_task};
pub use control::control_task;
