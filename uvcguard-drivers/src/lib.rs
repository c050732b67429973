//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in uvcguard-core on top of `embedded-hal` and `embedded-io`:
//!
//! - DS1302 bit-serial real-time clock
//! - Threshold sensor over an analog sampler (presence, overcurrent)
//! - GPIO lamp and alarm outputs
//! - Serial directive link

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod link;
pub mod output;
pub mod rtc;
pub mod sensor;
