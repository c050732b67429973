//! Configuration loading
//!
//! The node configuration is compiled in from client.toml and parsed
//! at start-up by the no_std parser in uvcguard-core.

use defmt::*;

use uvcguard_core::config::{parse_client_config, ClientConfig};

/// Embedded configuration (compiled into firmware)
/// Edit client.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../../client.toml");

/// Parse the embedded configuration, falling back to defaults
pub fn load() -> ClientConfig {
    match parse_client_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using default configuration");
            ClientConfig::default()
        }
    }
}
