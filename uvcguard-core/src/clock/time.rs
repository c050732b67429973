//! Cached time-of-day value

use super::field::RegisterField;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Hour register format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HourFormat {
    /// 12-hour mode, before noon
    Am,
    /// 12-hour mode, after noon
    Pm,
    /// 24-hour mode
    #[default]
    H24,
}

/// 12-hour mode flag (hour register bit 7)
const MODE_12H: u8 = 0x80;

/// PM flag in 12-hour mode (hour register bit 5)
const PM_FLAG: u8 = 0x20;

impl HourFormat {
    /// Extract the format from a raw hour register value
    pub fn from_register(raw: u8) -> Self {
        if raw & MODE_12H != 0 {
            if raw & PM_FLAG != 0 {
                HourFormat::Pm
            } else {
                HourFormat::Am
            }
        } else {
            HourFormat::H24
        }
    }

    /// Control bits to place on top of the packed hour digits
    pub fn control_bits(self) -> u8 {
        match self {
            HourFormat::Am => MODE_12H,
            HourFormat::Pm => MODE_12H | PM_FLAG,
            HourFormat::H24 => 0,
        }
    }

    /// Mask of the tens digit for this format
    ///
    /// 24-hour mode uses two bits (0-2), 12-hour mode one bit (0-1);
    /// bit 5 is the PM flag in 12-hour mode.
    pub fn tens_mask(self) -> u8 {
        match self {
            HourFormat::Am | HourFormat::Pm => 0x10,
            HourFormat::H24 => 0x30,
        }
    }

    /// Check if this is a 12-hour format
    pub fn is_12h(self) -> bool {
        !matches!(self, HourFormat::H24)
    }
}

/// Time of day as last read from the chip
///
/// Only as fresh as the last refresh of each field. The control loop
/// refreshes the hour alone; everything else is populated on an
/// explicit full refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeOfDay {
    pub second: u8,
    pub minute: u8,
    /// 0-23 for `H24`, 1-12 otherwise
    pub hour: u8,
    /// 1-7
    pub weekday: u8,
    pub date: u8,
    pub month: u8,
    /// Two-digit year
    pub year: u8,
    pub format: HourFormat,
}

impl Default for TimeOfDay {
    fn default() -> Self {
        Self {
            second: 0,
            minute: 0,
            hour: 0,
            weekday: 1,
            date: 1,
            month: 1,
            year: 0,
            format: HourFormat::H24,
        }
    }
}

impl TimeOfDay {
    /// Value of one field
    pub fn get(&self, field: RegisterField) -> u8 {
        match field {
            RegisterField::Second => self.second,
            RegisterField::Minute => self.minute,
            RegisterField::Hour => self.hour,
            RegisterField::Weekday => self.weekday,
            RegisterField::Date => self.date,
            RegisterField::Month => self.month,
            RegisterField::Year => self.year,
        }
    }

    /// Overwrite one field
    pub fn set(&mut self, field: RegisterField, value: u8) {
        match field {
            RegisterField::Second => self.second = value,
            RegisterField::Minute => self.minute = value,
            RegisterField::Hour => self.hour = value,
            RegisterField::Weekday => self.weekday = value,
            RegisterField::Date => self.date = value,
            RegisterField::Month => self.month = value,
            RegisterField::Year => self.year = value,
        }
    }

    /// Hour on a 0-23 scale regardless of format
    ///
    /// 12 AM is midnight (0), 12 PM is noon (12).
    pub fn hour_24(&self) -> u8 {
        match self.format {
            HourFormat::H24 => self.hour,
            HourFormat::Am => self.hour % 12,
            HourFormat::Pm => self.hour % 12 + 12,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_register() {
        assert_eq!(HourFormat::from_register(0x21), HourFormat::H24); // 21:00
        assert_eq!(HourFormat::from_register(0x89), HourFormat::Am); // 9 AM
        assert_eq!(HourFormat::from_register(0xA9), HourFormat::Pm); // 9 PM
    }

    #[test]
    fn test_format_ignores_pm_bit_in_24h_mode() {
        // Bit 5 is the tens-of-hours digit in 24-hour mode (20:00)
        assert_eq!(HourFormat::from_register(0x20), HourFormat::H24);
    }

    #[test]
    fn test_hour_24() {
        let mut t = TimeOfDay {
            hour: 12,
            format: HourFormat::Am,
            ..Default::default()
        };
        assert_eq!(t.hour_24(), 0);

        t.format = HourFormat::Pm;
        assert_eq!(t.hour_24(), 12);

        t.hour = 9;
        assert_eq!(t.hour_24(), 21);

        t.format = HourFormat::H24;
        t.hour = 17;
        assert_eq!(t.hour_24(), 17);
    }

    #[test]
    fn test_get_set() {
        let mut t = TimeOfDay::default();
        for (i, field) in RegisterField::ALL.into_iter().enumerate() {
            t.set(field, i as u8 + 1);
        }
        assert_eq!(t.second, 1);
        assert_eq!(t.year, 7);
        assert_eq!(t.get(RegisterField::Weekday), 4);
    }
}
