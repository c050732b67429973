//! Analog sensor traits

/// Errors that can occur when sampling an analog channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// ADC conversion failed
    ConversionError,
}

/// Raw analog sampling
///
/// The channel is selected once at construction; every call takes one
/// fresh conversion. Takes `&mut self` because ADC reads require
/// mutable access to the peripheral.
pub trait AnalogSampler {
    /// Take one raw sample in `[0, 2^bits - 1]`
    fn sample_raw(&mut self) -> Result<u16, SensorError>;
}
