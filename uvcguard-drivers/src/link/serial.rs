//! Directive transmitter over a byte-oriented serial port
//!
//! One directive is one byte. The link has no acknowledgement, so a
//! failed write is logged and dropped.

use embedded_io::Write;
use uvcguard_core::traits::DirectiveSink;
use uvcguard_core::Directive;

#[cfg(feature = "defmt")]
use defmt::warn;

/// Directive sink backed by a blocking serial writer
pub struct SerialLink<W> {
    tx: W,
    sent: u32,
    failed: u32,
}

impl<W: Write> SerialLink<W> {
    pub fn new(tx: W) -> Self {
        Self {
            tx,
            sent: 0,
            failed: 0,
        }
    }

    /// Directives written successfully
    pub fn sent(&self) -> u32 {
        self.sent
    }

    /// Directives dropped on a transport error
    pub fn failed(&self) -> u32 {
        self.failed
    }

    fn write_directive(&mut self, directive: Directive) -> Result<(), W::Error> {
        self.tx.write_all(&[directive.to_byte()])?;
        self.tx.flush()
    }
}

impl<W: Write> DirectiveSink for SerialLink<W> {
    fn send(&mut self, directive: Directive) {
        match self.write_directive(directive) {
            Ok(()) => self.sent = self.sent.wrapping_add(1),
            Err(_e) => {
                self.failed = self.failed.wrapping_add(1);
                #[cfg(feature = "defmt")]
                warn!("Link write failed, dropped {}", directive);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_io::{ErrorKind, ErrorType};

    struct MockTx {
        bytes: Vec<u8>,
        broken: bool,
    }

    impl ErrorType for MockTx {
        type Error = ErrorKind;
    }

    impl Write for MockTx {
        fn write(&mut self, buf: &[u8]) -> Result<usize, ErrorKind> {
            if self.broken {
                return Err(ErrorKind::BrokenPipe);
            }
            self.bytes.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> Result<(), ErrorKind> {
            Ok(())
        }
    }

    #[test]
    fn test_one_byte_per_directive() {
        let mut link = SerialLink::new(MockTx {
            bytes: Vec::new(),
            broken: false,
        });

        link.send(Directive::Illuminate);
        link.send(Directive::Extinguish);
        link.send(Directive::Extinguish);

        assert_eq!(
            link.tx.bytes,
            vec![
                Directive::Illuminate.to_byte(),
                Directive::Extinguish.to_byte(),
                Directive::Extinguish.to_byte()
            ]
        );
        assert_eq!(link.sent(), 3);
    }

    #[test]
    fn test_failure_is_swallowed() {
        let mut link = SerialLink::new(MockTx {
            bytes: Vec::new(),
            broken: true,
        });

        link.send(Directive::Illuminate);
        assert_eq!(link.sent(), 0);
        assert_eq!(link.failed(), 1);

        link.tx.broken = false;
        link.send(Directive::Extinguish);
        assert_eq!(link.tx.bytes, vec![Directive::Extinguish.to_byte()]);
    }
}
