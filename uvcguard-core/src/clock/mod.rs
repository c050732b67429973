//! Wall-clock time from a DS1302-style timekeeping chip
//!
//! The chip exposes seven BCD registers (second, minute, hour, weekday,
//! date, month, year), each reachable through a read address and a
//! write address. The hour register also carries the 12/24-hour mode
//! and AM/PM flags, which must be carried through every write.
//!
//! - [`field`] - register field tags and the address table
//! - [`codec`] - BCD packing/unpacking per field
//! - [`time`] - cached time-of-day value
//! - [`facade`] - refresh/commit on top of a [`RegisterBus`](crate::traits::RegisterBus)

pub mod codec;
pub mod facade;
pub mod field;
pub mod time;

pub use codec::{decode, encode, ClockError};
pub use facade::Clock;
pub use field::{RegisterField, CONTROL_READ, CONTROL_WRITE, WRITE_PROTECT};
pub use time::{HourFormat, TimeOfDay};
