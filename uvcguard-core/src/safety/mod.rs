//! Exposed-unit safety
//!
//! The exposed unit gates the lamp behind an overcurrent interlock that
//! runs independently of the controller's scheduling. Once tripped it
//! stays tripped until the unit is power cycled.

pub mod alarm;
pub mod interlock;
pub mod unit;

pub use alarm::{Alarm, AlarmMode};
pub use interlock::{Interlock, InterlockError, InterlockStatus};
pub use unit::ExposedUnit;
