//! Overcurrent interlock

use uvcguard_protocol::Directive;

use crate::traits::LampOutput;

/// Result of one interlock check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterlockStatus {
    /// No overcurrent seen
    Ok,
    /// Overcurrent seen for the first time on this check
    Tripped,
    /// Overcurrent was seen on an earlier check
    Latched,
}

/// Interlock errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterlockError {
    /// Illumination refused: overcurrent latched
    Latched,
}

impl InterlockError {
    /// Message shown to the operator
    pub fn message(&self) -> &'static str {
        match self {
            InterlockError::Latched => "Over-current detected. UV LED disabled for safety.",
        }
    }
}

/// Overcurrent latch
///
/// One overcurrent sample is enough. There is no in-process path that
/// clears the latch.
#[derive(Debug, Clone, Default)]
pub struct Interlock {
    overcurrent_latched: bool,
}

impl Interlock {
    /// Create an untripped interlock
    pub const fn new() -> Self {
        Self {
            overcurrent_latched: false,
        }
    }

    /// Evaluate one overcurrent sample
    ///
    /// Any overcurrent sample forces the lamp off, latched or not.
    pub fn check<L: LampOutput>(&mut self, overcurrent: bool, lamp: &mut L) -> InterlockStatus {
        if overcurrent {
            lamp.set_on(false);
            if self.overcurrent_latched {
                return InterlockStatus::Latched;
            }
            self.overcurrent_latched = true;
            return InterlockStatus::Tripped;
        }

        if self.overcurrent_latched {
            InterlockStatus::Latched
        } else {
            InterlockStatus::Ok
        }
    }

    /// Apply a directive to the lamp
    ///
    /// `Extinguish` is always honoured. `Illuminate` is refused once the
    /// interlock has latched and the lamp is held off.
    pub fn apply<L: LampOutput>(&self, directive: Directive, lamp: &mut L) -> Result<(), InterlockError> {
        match directive {
            Directive::Extinguish => {
                lamp.set_on(false);
                Ok(())
            }
            Directive::Illuminate if self.overcurrent_latched => {
                lamp.set_on(false);
                Err(InterlockError::Latched)
            }
            Directive::Illuminate => {
                lamp.set_on(true);
                Ok(())
            }
        }
    }

    /// Check if the interlock has latched
    pub fn is_latched(&self) -> bool {
        self.overcurrent_latched
    }
}
