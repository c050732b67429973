//! Node configuration
//!
//! Each firmware embeds a small TOML file. The types here carry the
//! behavioral parameters, and `parser` reads them without allocating.

mod parser;
mod types;

pub use parser::{parse_client_config, parse_server_config};
pub use types::{
    AlarmConfig, ClientConfig, ControlConfig, LinkConfig, ScheduleConfig, SensorConfig, ServerConfig,
    DEFAULT_BAUDRATE, MAX_DURATION_MINUTES,
};

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Unknown key in a known section
    UnknownKey,
    /// Value could not be parsed
    InvalidValue,
    /// Value parsed but outside its permitted range
    OutOfRange,
}
