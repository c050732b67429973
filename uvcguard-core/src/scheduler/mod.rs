//! Exposure scheduling
//!
//! Decides, once per control tick, whether the UV-C lamp may be lit:
//! only inside the daily time window, never while a person is present,
//! and for no longer than the configured duration per window.

pub mod exposure;
pub mod window;

pub use exposure::{ExposureFacts, ExposurePhase, ExposureRefusal, ExposureScheduler, ExposureState};
pub use window::TimeWindow;
