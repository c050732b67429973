//! Real-time clock register access

use crate::clock::RegisterField;

/// Byte-level access to a timekeeping chip's registers
///
/// Implementations own the wire framing (enable line, address byte,
/// data byte). There is no error path: a disconnected chip returns
/// whatever the data line floats to.
pub trait RegisterBus {
    /// Read one register
    fn read_register(&mut self, address: u8) -> u8;

    /// Write one register
    fn write_register(&mut self, address: u8, value: u8);

    /// Read the raw register backing a time field
    fn read_field(&mut self, field: RegisterField) -> u8 {
        self.read_register(field.read_address())
    }

    /// Write the raw register backing a time field
    fn write_field(&mut self, field: RegisterField, raw: u8) {
        self.write_register(field.write_address(), raw)
    }
}

impl<T: RegisterBus + ?Sized> RegisterBus for &mut T {
    fn read_register(&mut self, address: u8) -> u8 {
        (**self).read_register(address)
    }

    fn write_register(&mut self, address: u8, value: u8) {
        (**self).write_register(address, value)
    }
}
