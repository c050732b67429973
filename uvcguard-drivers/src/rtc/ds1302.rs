//! DS1302 trickle-charge timekeeping chip
//!
//! Three-wire bit-serial interface: chip enable (CE), serial clock
//! (SCLK) and a bidirectional data line (I/O). A transfer is a command
//! byte followed by one data byte, both least-significant bit first.
//!
//! ```text
//! CE    ___/‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾\___
//! SCLK  ____/‾\_/‾\_ ... _/‾\_/‾\_ ... _/‾\_______
//! I/O       A0  A1  ...  R/W D0  D1 ...  D7
//! ```
//!
//! The chip latches input bits on the rising edge of SCLK and drives
//! output bits after the falling edge, so writes settle the data line
//! before the rising edge and reads sample after the falling edge.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use uvcguard_core::traits::RegisterBus;

/// CE high to first clock
const SETUP_DELAY_US: u32 = 4;

/// Half of one SCLK period
const BIT_DELAY_US: u32 = 2;

/// Bidirectional data line
///
/// The line is driven for command and write phases and released for
/// the read phase of a transfer.
pub trait DataLine: OutputPin + InputPin {
    /// Release the line so the chip can drive it
    fn set_as_input(&mut self);

    /// Drive the line from this side
    fn set_as_output(&mut self);
}

/// DS1302 driver over GPIO bit-banging
///
/// Each register access runs inside a critical section so interrupt
/// latency cannot stretch a clock phase. Pin errors are discarded; on
/// the RP2040 they cannot occur.
pub struct Ds1302<CE, SCLK, IO, D> {
    ce: CE,
    sclk: SCLK,
    io: IO,
    delay: D,
}

impl<CE, SCLK, IO, D> Ds1302<CE, SCLK, IO, D>
where
    CE: OutputPin,
    SCLK: OutputPin,
    IO: DataLine,
    D: DelayNs,
{
    /// Create the driver with every line idle low
    pub fn new(ce: CE, sclk: SCLK, io: IO, delay: D) -> Self {
        let mut rtc = Self { ce, sclk, io, delay };
        let _ = rtc.sclk.set_low();
        let _ = rtc.ce.set_low();
        rtc.io.set_as_output();
        let _ = rtc.io.set_low();
        rtc
    }

    /// Read one register
    pub fn read_register(&mut self, address: u8) -> u8 {
        critical_section::with(|_| {
            self.begin();
            self.transfer_byte(address);
            let value = self.receive_byte();
            self.end();
            value
        })
    }

    /// Write one register
    pub fn write_register(&mut self, address: u8, value: u8) {
        critical_section::with(|_| {
            self.begin();
            self.transfer_byte(address);
            self.transfer_byte(value);
            self.end();
        })
    }

    /// Shift one byte out, LSB first
    pub fn transfer_byte(&mut self, value: u8) {
        self.io.set_as_output();

        for bit in 0..8 {
            let _ = self.io.set_low();
            if value & (1 << bit) != 0 {
                let _ = self.io.set_high();
            }
            let _ = self.sclk.set_low();
            self.delay.delay_us(BIT_DELAY_US);
            let _ = self.sclk.set_high();
            self.delay.delay_us(BIT_DELAY_US);
        }
    }

    /// Shift one byte in, LSB first
    pub fn receive_byte(&mut self) -> u8 {
        self.io.set_as_input();

        let mut value = 0u8;
        for _ in 0..8 {
            let _ = self.sclk.set_high();
            self.delay.delay_us(BIT_DELAY_US);
            let _ = self.sclk.set_low();
            self.delay.delay_us(BIT_DELAY_US);

            let bit = self.io.is_high().unwrap_or(false) as u8;
            value = (value >> 1) | (bit << 7);
        }

        self.io.set_as_output();
        value
    }

    /// Reset framing that opens a transfer
    fn begin(&mut self) {
        let _ = self.sclk.set_low();
        let _ = self.ce.set_low();
        let _ = self.ce.set_high();
        self.delay.delay_us(SETUP_DELAY_US);
    }

    fn end(&mut self) {
        let _ = self.ce.set_low();
        let _ = self.sclk.set_low();
    }
}

impl<CE, SCLK, IO, D> RegisterBus for Ds1302<CE, SCLK, IO, D>
where
    CE: OutputPin,
    SCLK: OutputPin,
    IO: DataLine,
    D: DelayNs,
{
    fn read_register(&mut self, address: u8) -> u8 {
        Ds1302::read_register(self, address)
    }

    fn write_register(&mut self, address: u8, value: u8) {
        Ds1302::write_register(self, address, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;
    use std::cell::RefCell;
    use std::rc::Rc;
    use uvcguard_core::clock::{Clock, HourFormat, RegisterField};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Phase {
        Command,
        Write,
        Read,
        Done,
    }

    /// Simulated chip driven by the three mock pins
    struct Chip {
        ce: bool,
        sclk: bool,
        master_io: bool,
        master_driving: bool,
        chip_io: bool,
        phase: Phase,
        shift: u8,
        count: u8,
        address: u8,
        registers: [u8; 32],
        /// Levels seen on I/O at each rising edge while CE is high
        sampled: Vec<bool>,
    }

    impl Chip {
        fn new() -> Self {
            Self {
                ce: false,
                sclk: false,
                master_io: false,
                master_driving: true,
                chip_io: false,
                phase: Phase::Done,
                shift: 0,
                count: 0,
                address: 0,
                registers: [0; 32],
                sampled: Vec::new(),
            }
        }

        fn set_ce(&mut self, high: bool) {
            if high && !self.ce {
                self.phase = Phase::Command;
                self.shift = 0;
                self.count = 0;
            }
            if !high {
                self.phase = Phase::Done;
            }
            self.ce = high;
        }

        fn set_sclk(&mut self, high: bool) {
            let rising = high && !self.sclk;
            let falling = !high && self.sclk;
            self.sclk = high;

            if !self.ce {
                return;
            }
            if rising {
                self.sampled.push(self.master_io);
                self.on_rising();
            }
            if falling && self.phase == Phase::Read && self.count < 8 {
                let register = self.registers[Self::index(self.address)];
                self.chip_io = register & (1 << self.count) != 0;
                self.count += 1;
            }
        }

        fn on_rising(&mut self) {
            match self.phase {
                Phase::Command | Phase::Write => {
                    self.shift |= (self.master_io as u8) << self.count;
                    self.count += 1;
                    if self.count < 8 {
                        return;
                    }
                    if self.phase == Phase::Command {
                        self.address = self.shift;
                        self.phase = if self.address & 0x01 != 0 {
                            Phase::Read
                        } else {
                            Phase::Write
                        };
                    } else {
                        self.registers[Self::index(self.address)] = self.shift;
                        self.phase = Phase::Done;
                    }
                    self.shift = 0;
                    self.count = 0;
                }
                Phase::Read | Phase::Done => {}
            }
        }

        fn index(address: u8) -> usize {
            ((address >> 1) & 0x1F) as usize
        }
    }

    type Shared = Rc<RefCell<Chip>>;

    struct CePin(Shared);
    struct SclkPin(Shared);
    struct IoPin(Shared);
    struct NoDelay;

    impl ErrorType for CePin {
        type Error = Infallible;
    }

    impl OutputPin for CePin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().set_ce(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().set_ce(true);
            Ok(())
        }
    }

    impl ErrorType for SclkPin {
        type Error = Infallible;
    }

    impl OutputPin for SclkPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().set_sclk(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().set_sclk(true);
            Ok(())
        }
    }

    impl ErrorType for IoPin {
        type Error = Infallible;
    }

    impl OutputPin for IoPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().master_io = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().master_io = true;
            Ok(())
        }
    }

    impl InputPin for IoPin {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            let chip = self.0.borrow();
            Ok(if chip.master_driving {
                chip.master_io
            } else {
                chip.chip_io
            })
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            self.is_high().map(|high| !high)
        }
    }

    impl DataLine for IoPin {
        fn set_as_input(&mut self) {
            self.0.borrow_mut().master_driving = false;
        }

        fn set_as_output(&mut self) {
            self.0.borrow_mut().master_driving = true;
        }
    }

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    fn rtc() -> (Ds1302<CePin, SclkPin, IoPin, NoDelay>, Shared) {
        let chip = Rc::new(RefCell::new(Chip::new()));
        let rtc = Ds1302::new(
            CePin(chip.clone()),
            SclkPin(chip.clone()),
            IoPin(chip.clone()),
            NoDelay,
        );
        (rtc, chip)
    }

    #[test]
    fn test_transfer_is_lsb_first() {
        let (mut rtc, chip) = rtc();
        chip.borrow_mut().set_ce(true);
        rtc.transfer_byte(0b1000_0101);

        let sampled = chip.borrow().sampled.clone();
        assert_eq!(
            sampled,
            vec![true, false, true, false, false, false, false, true]
        );
    }

    #[test]
    fn test_write_then_read_register() {
        let (mut rtc, chip) = rtc();

        rtc.write_register(0x84, 0x21);
        assert_eq!(chip.borrow().registers[2], 0x21);

        chip.borrow_mut().registers[0] = 0x59;
        assert_eq!(rtc.read_register(0x81), 0x59);
        assert_eq!(rtc.read_register(0x85), 0x21);
    }

    #[test]
    fn test_every_byte_survives_the_wire() {
        let (mut rtc, chip) = rtc();
        for value in 0..=255u8 {
            rtc.write_register(0xC0, value);
            assert_eq!(chip.borrow().registers[0], value);
            assert_eq!(rtc.read_register(0xC1), value);
        }
    }

    #[test]
    fn test_lines_idle_after_transfer() {
        let (mut rtc, chip) = rtc();
        rtc.read_register(0x81);

        let c = chip.borrow();
        assert!(!c.ce);
        assert!(!c.sclk);
        assert!(c.master_driving);
    }

    #[test]
    fn test_clock_over_ds1302() {
        let (rtc, chip) = rtc();
        chip.borrow_mut().registers[2] = 0x07;
        let mut clock = Clock::new(rtc);

        clock.set_hour_format(HourFormat::Pm).unwrap();
        assert_eq!(chip.borrow().registers[2], 0xA7);

        clock.refresh_field(RegisterField::Hour);
        clock.commit_field(RegisterField::Hour, 9).unwrap();
        assert_eq!(chip.borrow().registers[2], 0xA9);

        assert_eq!(clock.refresh_field(RegisterField::Hour), 9);
        assert_eq!(clock.time().format, HourFormat::Pm);
        assert_eq!(clock.time().hour_24(), 21);

        clock.set_hour_format(HourFormat::H24).unwrap();
        assert_eq!(chip.borrow().registers[2], 0x21);
    }
}
