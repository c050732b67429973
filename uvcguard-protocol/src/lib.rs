//! Directive link between the controller and the exposed unit
//!
//! The controller decides when the UV-C lamp may be lit and tells the
//! exposed unit over a dedicated UART. Every message is a single byte:
//!
//! ```text
//! ┌──────────┬──────────────┐
//! │ BYTE     │ DIRECTIVE    │
//! ├──────────┼──────────────┤
//! │ 't' 0x74 │ Illuminate   │
//! │ 'f' 0x66 │ Extinguish   │
//! └──────────┴──────────────┘
//! ```
//!
//! There is no framing, acknowledgement or retry. Both directives are
//! idempotent at the receiver, so the last byte written wins.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod directive;

pub use directive::{Directive, DirectiveError, DirectiveReceiver, LINK_BAUDRATE};
