//! BCD field encoding
//!
//! Every register stores a decimal value as packed BCD: units digit in
//! the low nibble, tens digit in the high nibble. Each field masks the
//! tens digit differently; bits outside the mask are control flags
//! (clock halt on seconds, 12/24 and AM/PM on hours) or unused.
//!
//! `decode` and `encode` are exact inverses over each field's valid
//! range.

use super::field::RegisterField;
use super::time::HourFormat;

/// Clock errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// Value outside the field's range for the current hour format
    ValueOutOfRange { field: RegisterField, value: u8 },
}

/// Units digit mask
const UNITS_MASK: u8 = 0x0F;

/// Weekday register holds a plain 1-7 value
const WEEKDAY_MASK: u8 = 0x07;

/// Tens-digit mask for every field except hour and weekday
fn tens_mask(field: RegisterField) -> u8 {
    match field {
        // Bit 7 of seconds is clock halt
        RegisterField::Second | RegisterField::Minute => 0x70,
        RegisterField::Date => 0x30,
        RegisterField::Month => 0x10,
        RegisterField::Year => 0xF0,
        RegisterField::Hour | RegisterField::Weekday => 0x00,
    }
}

fn pack_bcd(value: u8, tens_mask: u8) -> u8 {
    (((value / 10) << 4) & tens_mask) | (value % 10)
}

fn unpack_bcd(raw: u8, tens_mask: u8) -> u8 {
    (raw & UNITS_MASK) + ((raw & tens_mask) >> 4) * 10
}

/// Decode a raw register value
///
/// For the hour field the format is taken from the register itself
/// (bit 7 selects 12-hour mode, bit 5 then selects PM) before the digits
/// are unpacked, since the tens mask differs by format. Every other
/// field passes `current` through unchanged.
pub fn decode(field: RegisterField, raw: u8, current: HourFormat) -> (u8, HourFormat) {
    match field {
        RegisterField::Hour => {
            let format = HourFormat::from_register(raw);
            (unpack_bcd(raw, format.tens_mask()), format)
        }
        RegisterField::Weekday => (raw & WEEKDAY_MASK, current),
        _ => (unpack_bcd(raw, tens_mask(field)), current),
    }
}

/// Encode a value for writing to its register
///
/// The hour field gets the control bits of `format` on top of the
/// packed digits. Seconds are always written with the clock-halt bit
/// clear.
pub fn encode(field: RegisterField, value: u8, format: HourFormat) -> Result<u8, ClockError> {
    if !field.range(format).contains(&value) {
        return Err(ClockError::ValueOutOfRange { field, value });
    }

    let raw = match field {
        RegisterField::Hour => pack_bcd(value, format.tens_mask()) | format.control_bits(),
        RegisterField::Weekday => value & WEEKDAY_MASK,
        _ => pack_bcd(value, tens_mask(field)),
    };

    Ok(raw)
}
