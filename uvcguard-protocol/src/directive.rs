//! Directive encoding and decoding

/// Default link baud rate
pub const LINK_BAUDRATE: u32 = 115_200;

// Wire format values
const DIRECTIVE_ILLUMINATE: u8 = b't';
const DIRECTIVE_EXTINGUISH: u8 = b'f';

/// Lamp directive sent from the controller to the exposed unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Directive {
    /// Turn the UV-C lamp on
    Illuminate,
    /// Turn the UV-C lamp off
    Extinguish,
}

/// Errors that can occur when decoding a directive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DirectiveError {
    /// Byte does not name a directive
    UnknownByte(u8),
}

impl Directive {
    /// Parse a directive from its wire format byte
    pub fn from_byte(byte: u8) -> Result<Self, DirectiveError> {
        match byte {
            DIRECTIVE_ILLUMINATE => Ok(Directive::Illuminate),
            DIRECTIVE_EXTINGUISH => Ok(Directive::Extinguish),
            other => Err(DirectiveError::UnknownByte(other)),
        }
    }

    /// Convert to wire format byte
    pub fn to_byte(self) -> u8 {
        match self {
            Directive::Illuminate => DIRECTIVE_ILLUMINATE,
            Directive::Extinguish => DIRECTIVE_EXTINGUISH,
        }
    }
}

impl TryFrom<u8> for Directive {
    type Error = DirectiveError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Self::from_byte(byte)
    }
}

impl From<Directive> for u8 {
    fn from(directive: Directive) -> Self {
        directive.to_byte()
    }
}

/// Receive side of the link
///
/// Turns the raw byte stream into directives. Line endings and spaces
/// are skipped silently so the exposed unit can also be driven from a
/// serial terminal; any other unknown byte is reported once and dropped.
#[derive(Debug, Clone, Default)]
pub struct DirectiveReceiver {
    /// Most recent directive accepted
    last: Option<Directive>,
    /// Bytes rejected since power-on
    rejected: u32,
}

impl DirectiveReceiver {
    /// Create a new receiver
    pub const fn new() -> Self {
        Self {
            last: None,
            rejected: 0,
        }
    }

    /// Feed a single byte to the receiver
    ///
    /// Returns `Ok(Some(directive))` for a directive byte, `Ok(None)` for
    /// ignorable whitespace, or `Err` for any other byte.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Directive>, DirectiveError> {
        if matches!(byte, b'\r' | b'\n' | b' ') {
            return Ok(None);
        }

        match Directive::from_byte(byte) {
            Ok(directive) => {
                self.last = Some(directive);
                Ok(Some(directive))
            }
            Err(e) => {
                self.rejected = self.rejected.saturating_add(1);
                Err(e)
            }
        }
    }

    /// Most recent directive accepted, if any
    pub fn last(&self) -> Option<Directive> {
        self.last
    }

    /// Number of bytes rejected as noise
    pub fn rejected(&self) -> u32 {
        self.rejected
    }
}
