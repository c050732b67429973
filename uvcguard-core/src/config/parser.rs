//! Minimal TOML parser for node configuration
//!
//! Handles only the subset the node files use:
//! - `[section]` headers
//! - `key = value` pairs with integer values
//! - Comments (`# ...`), whole-line or trailing
//!
//! Omitted keys keep their default. Unknown sections and keys are
//! rejected so typos do not silently fall back to defaults.

use super::types::{
    AlarmConfig, ClientConfig, ControlConfig, LinkConfig, ScheduleConfig, SensorConfig, ServerConfig,
};
use super::ConfigError;

/// Parse the controller configuration
pub fn parse_server_config(input: &str) -> Result<ServerConfig, ConfigError> {
    let mut config = ServerConfig::default();

    for_each_entry(input, |section, key, value| match section {
        "schedule" => apply_schedule(&mut config.schedule, key, value),
        "presence" => apply_sensor(&mut config.presence, key, value),
        "link" => apply_link(&mut config.link, key, value),
        "control" => apply_control(&mut config.control, key, value),
        _ => Err(ConfigError::InvalidSection),
    })?;

    config.validate()?;
    Ok(config)
}

/// Parse the exposed-unit configuration
pub fn parse_client_config(input: &str) -> Result<ClientConfig, ConfigError> {
    let mut config = ClientConfig::default();

    for_each_entry(input, |section, key, value| match section {
        "overcurrent" => apply_sensor(&mut config.overcurrent, key, value),
        "alarm" => apply_alarm(&mut config.alarm, key, value),
        "link" => apply_link(&mut config.link, key, value),
        "control" => apply_control(&mut config.control, key, value),
        _ => Err(ConfigError::InvalidSection),
    })?;

    config.validate()?;
    Ok(config)
}

/// Walk every `key = value` line with its enclosing section name
fn for_each_entry<F>(input: &str, mut apply: F) -> Result<(), ConfigError>
where
    F: FnMut(&str, &str, &str) -> Result<(), ConfigError>,
{
    let mut section = "";

    for line in input.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line)?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ConfigError::InvalidValue)?;
        // Keys before the first header belong to no section
        if section.is_empty() {
            return Err(ConfigError::InvalidSection);
        }
        apply(section, key, value)?;
    }

    Ok(())
}

fn apply_schedule(s: &mut ScheduleConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "start_hour" => s.start_hour = parse_int(value)?,
        "end_hour" => s.end_hour = parse_int(value)?,
        "duration_minutes" => s.duration_minutes = parse_int(value)?,
        _ => return Err(ConfigError::UnknownKey),
    }
    Ok(())
}

fn apply_sensor(s: &mut SensorConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "reference_mv" => s.reference_mv = parse_int(value)?,
        "adc_bits" => s.adc_bits = parse_int(value)?,
        "threshold_mv" => s.threshold_mv = parse_int(value)?,
        _ => return Err(ConfigError::UnknownKey),
    }
    Ok(())
}

fn apply_alarm(a: &mut AlarmConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "buzzer_period_ms" => a.buzzer_period_ms = parse_int(value)?,
        "indicator_period_ms" => a.indicator_period_ms = parse_int(value)?,
        _ => return Err(ConfigError::UnknownKey),
    }
    Ok(())
}

fn apply_link(l: &mut LinkConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "baudrate" => l.baudrate = parse_int(value)?,
        _ => return Err(ConfigError::UnknownKey),
    }
    Ok(())
}

fn apply_control(c: &mut ControlConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "tick_ms" => c.tick_ms = parse_int(value)?,
        _ => return Err(ConfigError::UnknownKey),
    }
    Ok(())
}

/// Parse `[name]`
fn parse_section_header(line: &str) -> Result<&str, ConfigError> {
    let name = line
        .strip_prefix('[')
        .and_then(|rest| rest.split('#').next())
        .map(str::trim)
        .and_then(|rest| rest.strip_suffix(']'))
        .map(str::trim)
        .ok_or(ConfigError::InvalidSection)?;

    if name.is_empty() {
        return Err(ConfigError::InvalidSection);
    }
    Ok(name)
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    // Remove inline comments
    let value = match value.find('#') {
        Some(hash_pos) => value[..hash_pos].trim(),
        None => value,
    };

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse an integer value, allowing `_` digit separators
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ConfigError> {
    if value.contains('_') {
        let mut digits = heapless::String::<20>::new();
        for c in value.chars().filter(|&c| c != '_') {
            digits.push(c).map_err(|_| ConfigError::InvalidValue)?;
        }
        return digits.parse().map_err(|_| ConfigError::InvalidValue);
    }
    value.parse().map_err(|_| ConfigError::InvalidValue)
}
