//! Board-agnostic core logic for the UV-C fixture firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (RTC register bus, analog sampler, outputs)
//! - RTC field codec and the cached clock facade
//! - Presence and overcurrent threshold classification
//! - Exposure scheduler (time window, duration cap, presence hold)
//! - Overcurrent interlock and alarm pattern
//! - Console command grammar
//! - Configuration types and the embedded TOML parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod clock;
pub mod config;
pub mod console;
pub mod safety;
pub mod scheduler;
pub mod sensor;
pub mod traits;

pub use uvcguard_protocol::Directive;
