//! Clock facade over the register bus

use super::codec::{decode, encode, ClockError};
use super::field::{RegisterField, CONTROL_READ, CONTROL_WRITE, WRITE_PROTECT};
use super::time::{HourFormat, TimeOfDay};
use crate::traits::RegisterBus;

/// Clock-halt flag in the raw seconds register
const CLOCK_HALT: u8 = 0x80;

/// Cached time-of-day backed by a timekeeping chip
///
/// Reads mutate the cache in place; nothing is invalidated implicitly,
/// so callers refresh exactly the fields they depend on. The cached hour
/// format is used for every hour write, which keeps the chip's 12/24
/// mode intact across commits.
pub struct Clock<R> {
    bus: R,
    time: TimeOfDay,
}

impl<R: RegisterBus> Clock<R> {
    /// Create a clock with an empty cache
    pub fn new(bus: R) -> Self {
        Self {
            bus,
            time: TimeOfDay::default(),
        }
    }

    /// Re-read one field from the chip
    ///
    /// Returns the decoded value. Reading the hour also refreshes the
    /// cached hour format.
    pub fn refresh_field(&mut self, field: RegisterField) -> u8 {
        let raw = self.bus.read_field(field);
        let (value, format) = decode(field, raw, self.time.format);
        self.time.set(field, value);
        self.time.format = format;
        value
    }

    /// Re-read all seven fields
    pub fn refresh_all(&mut self) -> &TimeOfDay {
        for field in RegisterField::ALL {
            self.refresh_field(field);
        }
        &self.time
    }

    /// Encode and write one field
    ///
    /// Out-of-range values are rejected before anything is written.
    pub fn commit_field(&mut self, field: RegisterField, value: u8) -> Result<(), ClockError> {
        let raw = encode(field, value, self.time.format)?;
        self.bus.write_field(field, raw);
        self.time.set(field, value);
        Ok(())
    }

    /// Switch the chip's hour register to `format`
    ///
    /// The hour is re-read and written back in the new format at once,
    /// so the next refresh reads the same format. Switching to 24-hour
    /// keeps the time of day; switching to AM or PM keeps the 12-hour
    /// digits and selects that half of the day.
    pub fn set_hour_format(&mut self, format: HourFormat) -> Result<(), ClockError> {
        self.refresh_field(RegisterField::Hour);
        let hour_24 = self.time.hour_24();
        let value = if format.is_12h() {
            match hour_24 % 12 {
                0 => 12,
                h => h,
            }
        } else {
            hour_24
        };
        let previous = self.time.format;
        self.time.format = format;
        let result = self.commit_field(RegisterField::Hour, value);
        if result.is_err() {
            self.time.format = previous;
        }
        result
    }

    /// Set or clear the chip's write-protect flag
    ///
    /// Commits are ignored by the chip while write-protect is set.
    pub fn set_write_protect(&mut self, enabled: bool) {
        let value = if enabled { WRITE_PROTECT } else { 0 };
        self.bus.write_register(CONTROL_WRITE, value);
    }

    /// Check the chip's write-protect flag
    pub fn is_write_protected(&mut self) -> bool {
        self.bus.read_register(CONTROL_READ) & WRITE_PROTECT != 0
    }

    /// Check if the oscillator is stopped
    ///
    /// A chip that lost its backup supply powers up halted; committing
    /// the seconds field restarts it.
    pub fn is_halted(&mut self) -> bool {
        self.bus.read_field(RegisterField::Second) & CLOCK_HALT != 0
    }

    /// Cached time as of the last refresh
    pub fn time(&self) -> &TimeOfDay {
        &self.time
    }
}
