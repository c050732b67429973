//! Analog sensor drivers

pub mod threshold;

pub use threshold::ThresholdSensor;
