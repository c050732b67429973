//! Boolean sensor over one analog channel
//!
//! Used for both the radar presence detector and the lamp current
//! sense. Each read takes one fresh sample; there is no filtering.

use uvcguard_core::sensor::Threshold;
use uvcguard_core::traits::{AnalogSampler, SensorError};

/// Analog channel classified against a fixed threshold
pub struct ThresholdSensor<S> {
    sampler: S,
    threshold: Threshold,
    last_raw: Option<u16>,
}

impl<S: AnalogSampler> ThresholdSensor<S> {
    /// Create a sensor
    pub fn new(sampler: S, threshold: Threshold) -> Self {
        Self {
            sampler,
            threshold,
            last_raw: None,
        }
    }

    /// Sample and classify
    ///
    /// Returns `true` when the sample is above the threshold.
    pub fn read(&mut self) -> Result<bool, SensorError> {
        let raw = self.sampler.sample_raw()?;
        self.last_raw = Some(raw);
        Ok(self.threshold.classify(raw))
    }

    /// Raw value of the last successful sample
    pub fn last_raw(&self) -> Option<u16> {
        self.last_raw
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }
}
