//! Inter-node directive link

pub mod serial;

pub use serial::SerialLink;
