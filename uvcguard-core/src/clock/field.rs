//! Register field tags and addresses

use core::ops::RangeInclusive;

use super::time::HourFormat;

/// Control register write address (write-protect flag)
pub const CONTROL_WRITE: u8 = 0x8E;

/// Control register read address
pub const CONTROL_READ: u8 = 0x8F;

/// Write-protect bit in the control register
pub const WRITE_PROTECT: u8 = 0x80;

/// One of the seven timekeeping registers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterField {
    Second,
    Minute,
    Hour,
    Weekday,
    Date,
    Month,
    Year,
}

/// Read/write address pair for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Addresses {
    read: u8,
    write: u8,
}

/// Address table, indexed by `RegisterField as usize`
const ADDRESSES: [Addresses; 7] = [
    Addresses { read: 0x81, write: 0x80 }, // Second
    Addresses { read: 0x83, write: 0x82 }, // Minute
    Addresses { read: 0x85, write: 0x84 }, // Hour
    Addresses { read: 0x8B, write: 0x8A }, // Weekday
    Addresses { read: 0x87, write: 0x86 }, // Date
    Addresses { read: 0x89, write: 0x88 }, // Month
    Addresses { read: 0x8D, write: 0x8C }, // Year
];

impl RegisterField {
    /// All fields in the order a full refresh reads them
    pub const ALL: [RegisterField; 7] = [
        RegisterField::Second,
        RegisterField::Minute,
        RegisterField::Hour,
        RegisterField::Weekday,
        RegisterField::Date,
        RegisterField::Month,
        RegisterField::Year,
    ];

    /// Register address used to read this field
    pub fn read_address(self) -> u8 {
        ADDRESSES[self as usize].read
    }

    /// Register address used to write this field
    pub fn write_address(self) -> u8 {
        ADDRESSES[self as usize].write
    }

    /// Valid decoded values for this field
    ///
    /// The hour range depends on the format: 0-23 in 24-hour mode,
    /// 1-12 with an AM/PM tag.
    pub fn range(self, format: HourFormat) -> RangeInclusive<u8> {
        match self {
            RegisterField::Second | RegisterField::Minute => 0..=59,
            RegisterField::Hour => match format {
                HourFormat::H24 => 0..=23,
                HourFormat::Am | HourFormat::Pm => 1..=12,
            },
            RegisterField::Weekday => 1..=7,
            RegisterField::Date => 1..=31,
            RegisterField::Month => 1..=12,
            RegisterField::Year => 0..=99,
        }
    }

    /// Look up a field by its console name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "second" | "sec" => Some(RegisterField::Second),
            "minute" | "min" => Some(RegisterField::Minute),
            "hour" => Some(RegisterField::Hour),
            "weekday" | "day" => Some(RegisterField::Weekday),
            "date" => Some(RegisterField::Date),
            "month" => Some(RegisterField::Month),
            "year" => Some(RegisterField::Year),
            _ => None,
        }
    }

    /// Console name of this field
    pub fn name(self) -> &'static str {
        match self {
            RegisterField::Second => "second",
            RegisterField::Minute => "minute",
            RegisterField::Hour => "hour",
            RegisterField::Weekday => "weekday",
            RegisterField::Date => "date",
            RegisterField::Month => "month",
            RegisterField::Year => "year",
        }
    }
}
