//! RP2040 bindings for the UV-C fixture firmware
//!
//! Adapts embassy-rp peripherals to the traits in `uvcguard-core` and
//! `uvcguard-drivers`:
//!
//! - Bidirectional GPIO for the RTC data line
//! - Blocking ADC channel as an analog sampler

#![no_std]

pub mod adc;
pub mod gpio;

pub use adc::AdcSampler;
pub use gpio::FlexDataLine;
