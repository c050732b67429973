//! Configuration type definitions
//!
//! These types hold the behavioral parameters of both nodes. Pin
//! assignments are fixed by the board and stay in the firmware.

use crate::scheduler::TimeWindow;
use crate::sensor::Threshold;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Longest permitted exposure per window (one day)
pub const MAX_DURATION_MINUTES: u16 = 1440;

/// Default serial link baud rate
pub const DEFAULT_BAUDRATE: u32 = uvcguard_protocol::LINK_BAUDRATE;

/// Daily exposure schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScheduleConfig {
    /// Hour after which illumination is permitted (0-23)
    pub start_hour: u8,
    /// Hour before which illumination must end (0-23)
    pub end_hour: u8,
    /// Illumination cap per window occurrence
    pub duration_minutes: u16,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            start_hour: 20,
            end_hour: 22,
            duration_minutes: 90,
        }
    }
}

impl ScheduleConfig {
    /// The permitted window
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start_hour, self.end_hour)
    }

    /// Duration cap in seconds
    pub fn cap_seconds(&self) -> u32 {
        u32::from(self.duration_minutes) * 60
    }

    /// Check field ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.start_hour > 23 || self.end_hour > 23 {
            return Err(ConfigError::OutOfRange);
        }
        if self.duration_minutes == 0 || self.duration_minutes > MAX_DURATION_MINUTES {
            return Err(ConfigError::OutOfRange);
        }
        Ok(())
    }
}

/// Analog threshold sensor parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorConfig {
    /// ADC reference voltage
    pub reference_mv: u16,
    /// ADC resolution
    pub adc_bits: u8,
    /// Voltage above which the condition is present
    pub threshold_mv: u16,
}

impl SensorConfig {
    /// Radar presence sensor: 2.0 V on a 3.3 V 12-bit ADC
    pub const PRESENCE: Self = Self {
        reference_mv: 3300,
        adc_bits: 12,
        threshold_mv: 2000,
    };

    /// Lamp current sense: 1.8 V on a 3.3 V 12-bit ADC
    pub const OVERCURRENT: Self = Self {
        reference_mv: 3300,
        adc_bits: 12,
        threshold_mv: 1800,
    };

    /// Raw threshold for the configured ADC
    pub fn threshold(&self) -> Threshold {
        Threshold::from_millivolts(self.reference_mv, self.adc_bits, self.threshold_mv)
    }

    /// Check field ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(8..=16).contains(&self.adc_bits) {
            return Err(ConfigError::OutOfRange);
        }
        if self.reference_mv == 0 || self.threshold_mv > self.reference_mv {
            return Err(ConfigError::OutOfRange);
        }
        Ok(())
    }
}

/// Alarm toggle periods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AlarmConfig {
    pub buzzer_period_ms: u32,
    pub indicator_period_ms: u32,
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self {
            buzzer_period_ms: 1,
            indicator_period_ms: 1000,
        }
    }
}

impl AlarmConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buzzer_period_ms == 0 || self.indicator_period_ms == 0 {
            return Err(ConfigError::OutOfRange);
        }
        Ok(())
    }
}

/// Inter-node serial link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkConfig {
    pub baudrate: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            baudrate: DEFAULT_BAUDRATE,
        }
    }
}

/// Control loop timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControlConfig {
    /// Period of the control tick
    pub tick_ms: u32,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self { tick_ms: 1000 }
    }
}

/// Controller node configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ServerConfig {
    pub schedule: ScheduleConfig,
    pub presence: SensorConfig,
    pub link: LinkConfig,
    pub control: ControlConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            schedule: ScheduleConfig::default(),
            presence: SensorConfig::PRESENCE,
            link: LinkConfig::default(),
            control: ControlConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.schedule.validate()?;
        self.presence.validate()?;
        validate_common(&self.link, &self.control)
    }
}

/// Exposed-unit node configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClientConfig {
    pub overcurrent: SensorConfig,
    pub alarm: AlarmConfig,
    pub link: LinkConfig,
    pub control: ControlConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            overcurrent: SensorConfig::OVERCURRENT,
            alarm: AlarmConfig::default(),
            link: LinkConfig::default(),
            control: ControlConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.overcurrent.validate()?;
        self.alarm.validate()?;
        validate_common(&self.link, &self.control)
    }
}

fn validate_common(link: &LinkConfig, control: &ControlConfig) -> Result<(), ConfigError> {
    if link.baudrate == 0 || control.tick_ms == 0 {
        return Err(ConfigError::OutOfRange);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(ServerConfig::default().validate(), Ok(()));
        assert_eq!(ClientConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_default_thresholds() {
        assert_eq!(SensorConfig::PRESENCE.threshold().raw(), 2482);
        assert_eq!(SensorConfig::OVERCURRENT.threshold().raw(), 2234);
    }

    #[test]
    fn test_schedule_derived_values() {
        let s = ScheduleConfig::default();
        assert_eq!(s.cap_seconds(), 5400);
        assert!(s.window().contains(21));
        assert!(!s.window().contains(20));
    }

    #[test]
    fn test_schedule_ranges() {
        let mut s = ScheduleConfig::default();
        s.duration_minutes = 0;
        assert_eq!(s.validate(), Err(ConfigError::OutOfRange));
        s.duration_minutes = MAX_DURATION_MINUTES;
        assert_eq!(s.validate(), Ok(()));
        s.end_hour = 24;
        assert_eq!(s.validate(), Err(ConfigError::OutOfRange));
    }

    #[test]
    fn test_sensor_ranges() {
        let mut c = SensorConfig::PRESENCE;
        c.adc_bits = 17;
        assert_eq!(c.validate(), Err(ConfigError::OutOfRange));
        c.adc_bits = 12;
        c.threshold_mv = 3400;
        assert_eq!(c.validate(), Err(ConfigError::OutOfRange));
    }
}
