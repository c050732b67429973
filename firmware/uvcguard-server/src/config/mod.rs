//! Configuration loading
//!
//! The node configuration is compiled in from server.toml and parsed
//! at start-up by the no_std parser in uvcguard-core.

use defmt::*;

use uvcguard_core::config::{parse_server_config, ServerConfig};

/// Embedded configuration (compiled into firmware)
/// Edit server.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../../server.toml");

/// Parse the embedded configuration, falling back to defaults
pub fn load() -> ServerConfig {
    match parse_server_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            // build.rs validates server.toml, so this means the two
            // validators disagree
            error!("Failed to parse embedded config: {:?}", e);
            error!("Using default configuration");
            ServerConfig::default()
        }
    }
}
