//! GPIO outputs

pub mod alarm;
pub mod lamp;

pub use alarm::GpioAlarm;
pub use lamp::GpioLamp;
