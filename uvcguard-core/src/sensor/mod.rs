//! Threshold classification of analog samples
//!
//! Presence (radar/PIR) and overcurrent (current sense) are both plain
//! greater-than comparisons of one raw ADC sample against a threshold
//! fixed at start-up. No filtering, no hysteresis: each control tick
//! takes one fresh sample.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Raw ADC threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Threshold {
    raw: u16,
}

impl Threshold {
    /// Threshold from a raw ADC count
    pub const fn from_raw(raw: u16) -> Self {
        Self { raw }
    }

    /// Threshold from a calibration voltage
    ///
    /// `raw = floor(2^bits * limit_mv / reference_mv)`, saturating at
    /// `u16::MAX`. A 12-bit ADC at 3300 mV gives 2482 for 2000 mV.
    pub const fn from_millivolts(reference_mv: u16, adc_bits: u8, limit_mv: u16) -> Self {
        if reference_mv == 0 {
            return Self { raw: u16::MAX };
        }
        let full_scale = 1u64 << adc_bits;
        let raw = full_scale * limit_mv as u64 / reference_mv as u64;
        let raw = if raw > u16::MAX as u64 {
            u16::MAX
        } else {
            raw as u16
        };
        Self { raw }
    }

    /// Raw ADC count
    pub fn raw(&self) -> u16 {
        self.raw
    }

    /// Classify one sample against this threshold
    pub fn classify(&self, sample: u16) -> bool {
        classify(sample, *self)
    }
}

/// Convert a raw sample to a boolean fact
pub fn classify(sample: u16, threshold: Threshold) -> bool {
    sample > threshold.raw
}
