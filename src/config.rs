//! # Configuration Module
//!
//! Handles loading and validating core configuration from TOML files.
//!
//! The configuration carries the device dimension caps (how many axes,
//! hats and buttons a joystick may expose to the engine), the default
//! axis deadzone, and the input-history `fill_fake_inputs` switch.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::Result;

/// Hard upper bound on joystick axes tracked by a mapping.
pub const MAX_AXES: usize = 8;

/// Hard upper bound on joystick hats tracked by a mapping.
pub const MAX_HATS: usize = 4;

/// Hard upper bound on joystick buttons tracked by a mapping.
///
/// Capture scratch keeps pressed buttons in a `u32` bitmask, so this can
/// never exceed 32.
pub const MAX_BUTTONS: usize = 32;

/// Default axis deadzone in raw axis units.
pub const DEFAULT_DEADZONE: u16 = 25000;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct CoreConfig {
    #[serde(default)]
    pub devices: DeviceConfig,

    #[serde(default)]
    pub history: HistoryConfig,
}

/// Device limit configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DeviceConfig {
    #[serde(default = "default_max_axes")]
    pub max_axes: usize,

    #[serde(default = "default_max_hats")]
    pub max_hats: usize,

    #[serde(default = "default_max_buttons")]
    pub max_buttons: usize,

    #[serde(default = "default_deadzone")]
    pub default_deadzone: u16,
}

/// Input-history configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HistoryConfig {
    /// When enabled, the history buffer tracks which frames were written
    /// explicitly versus filled by padding.
    #[serde(default)]
    pub fill_fake_inputs: bool,
}

// Default value functions
fn default_max_axes() -> usize { MAX_AXES }
fn default_max_hats() -> usize { MAX_HATS }
fn default_max_buttons() -> usize { MAX_BUTTONS }
fn default_deadzone() -> u16 { DEFAULT_DEADZONE }

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            max_axes: default_max_axes(),
            max_hats: default_max_hats(),
            max_buttons: default_max_buttons(),
            default_deadzone: default_deadzone(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { fill_fake_inputs: false }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            devices: DeviceConfig::default(),
            history: HistoryConfig::default(),
        }
    }
}

impl CoreConfig {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use fightpad_core::config::CoreConfig;
    ///
    /// let config = CoreConfig::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: CoreConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    pub fn validate(&self) -> Result<()> {
        if self.devices.max_axes == 0 || self.devices.max_axes > MAX_AXES {
            return Err(crate::error::CoreError::Config(toml::de::Error::custom(
                format!("max_axes must be between 1 and {}", MAX_AXES),
            )));
        }

        if self.devices.max_hats == 0 || self.devices.max_hats > MAX_HATS {
            return Err(crate::error::CoreError::Config(toml::de::Error::custom(
                format!("max_hats must be between 1 and {}", MAX_HATS),
            )));
        }

        if self.devices.max_buttons == 0 || self.devices.max_buttons > MAX_BUTTONS {
            return Err(crate::error::CoreError::Config(toml::de::Error::custom(
                format!("max_buttons must be between 1 and {}", MAX_BUTTONS),
            )));
        }

        if self.devices.default_deadzone == 0 {
            return Err(crate::error::CoreError::Config(toml::de::Error::custom(
                "default_deadzone must be greater than 0",
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CoreConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.devices.max_axes, MAX_AXES);
        assert_eq!(config.devices.max_hats, MAX_HATS);
        assert_eq!(config.devices.max_buttons, MAX_BUTTONS);
        assert_eq!(config.devices.default_deadzone, DEFAULT_DEADZONE);
        assert!(!config.history.fill_fake_inputs);
    }

    #[test]
    fn test_max_axes_zero() {
        let mut config = CoreConfig::default();
        config.devices.max_axes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_max_axes_too_high() {
        let mut config = CoreConfig::default();
        config.devices.max_axes = MAX_AXES + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_max_hats_zero() {
        let mut config = CoreConfig::default();
        config.devices.max_hats = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_max_buttons_too_high() {
        let mut config = CoreConfig::default();
        config.devices.max_buttons = 33;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deadzone_zero() {
        let mut config = CoreConfig::default();
        config.devices.default_deadzone = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_config_from_file() -> anyhow::Result<()> {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let toml_content = r#"
[devices]
max_axes = 4
default_deadzone = 12000

[history]
fill_fake_inputs = true
"#;

        let mut temp_file = NamedTempFile::new()?;
        temp_file.write_all(toml_content.as_bytes())?;
        temp_file.flush()?;

        let config = CoreConfig::load(temp_file.path())?;
        assert_eq!(config.devices.max_axes, 4);
        assert_eq!(config.devices.max_hats, MAX_HATS);
        assert_eq!(config.devices.default_deadzone, 12000);
        assert!(config.history.fill_fake_inputs);
        Ok(())
    }

    #[test]
    fn test_load_empty_file_uses_defaults() -> anyhow::Result<()> {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut temp_file = NamedTempFile::new()?;
        temp_file.write_all(b"")?;
        temp_file.flush()?;

        let config = CoreConfig::load(temp_file.path())?;
        assert_eq!(config.devices.max_buttons, MAX_BUTTONS);
        Ok(())
    }
}
