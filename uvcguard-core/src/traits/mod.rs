//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod output;
pub mod rtc;
pub mod sensor;

pub use output::{AlarmOutput, DirectiveSink, LampOutput};
pub use rtc::RegisterBus;
pub use sensor::{AnalogSampler, SensorError};
