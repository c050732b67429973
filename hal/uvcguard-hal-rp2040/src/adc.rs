//! ADC channel sampling
//!
//! The RP2040 ADC is 12-bit. Both nodes read one channel once per
//! second, so the blocking conversion (about 2 µs) is used directly
//! from the control loop.

use embassy_rp::adc::{Adc, Blocking, Channel};
use uvcguard_core::traits::{AnalogSampler, SensorError};

/// One ADC channel bound to the converter
pub struct AdcSampler<'d> {
    adc: Adc<'d, Blocking>,
    channel: Channel<'d>,
}

impl<'d> AdcSampler<'d> {
    pub fn new(adc: Adc<'d, Blocking>, channel: Channel<'d>) -> Self {
        Self { adc, channel }
    }
}

impl AnalogSampler for AdcSampler<'_> {
    fn sample_raw(&mut self) -> Result<u16, SensorError> {
        self.adc
            .blocking_read(&mut self.channel)
            .map_err(|_| SensorError::ConversionError)
    }
}
