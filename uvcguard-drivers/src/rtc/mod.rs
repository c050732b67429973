//! Real-time clock drivers

pub mod ds1302;

pub use ds1302::{DataLine, Ds1302};
