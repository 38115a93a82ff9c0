pub mod path;

#[cfg(test)]
mod config_test;

use std::{io, path::Path, time::Duration};

use glob_match::glob_match;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::{controller::ControllerOptions, event::queue::DEFAULT_QUEUE_SIZE};

/// Default interval between two polls of a pumped device
const DEFAULT_PUMP_INTERVAL_MS: u64 = 4;
/// Default number of event batches buffered by a pumped device
const DEFAULT_PUMP_CAPACITY: usize = 64;

/// Represents all possible errors loading a [Config]
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Could not read: {0}")]
    IoError(#[from] io::Error),
    #[error("Unable to deserialize: {0}")]
    DeserializeError(#[from] serde_yaml::Error),
}

/// Runtime configuration of the input environment
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Capacity of the event queue of each controller
    pub event_queue_size: Option<usize>,
    /// Merge event and joystick device nodes of the same physical device
    pub fuse_joystick_devices: Option<bool>,
    /// Glob patterns matched against device names to skip at enumeration
    pub ignore_devices: Option<Vec<String>>,
    /// Poll every device on a background thread
    pub event_pump: Option<EventPumpConfig>,
    pub rumble: Option<RumbleConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct EventPumpConfig {
    pub interval_ms: Option<u64>,
    pub capacity: Option<usize>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct RumbleConfig {
    pub enabled: Option<bool>,
}

impl Config {
    /// Load a [Config] from the given YAML string
    pub fn from_yaml(content: String) -> Result<Config, LoadError> {
        let config: Config = serde_yaml::from_str(content.as_str())?;
        Ok(config)
    }

    /// Load a [Config] from the given YAML file
    pub fn from_yaml_file(path: String) -> Result<Config, LoadError> {
        Config::from_yaml_path(Path::new(path.as_str()))
    }

    /// Load a [Config] from the given YAML file path
    pub fn from_yaml_path(path: &Path) -> Result<Config, LoadError> {
        let file = std::fs::File::open(path)?;
        let config: Config = serde_yaml::from_reader(file)?;
        Ok(config)
    }

    /// Load the first configuration file found in the search path. Returns
    /// the default configuration if no file exists or it cannot be loaded.
    pub fn load() -> Config {
        let Some(path) = path::find_config_file() else {
            log::debug!("No config file found, using defaults");
            return Config::default();
        };
        match Config::from_yaml_path(&path) {
            Ok(config) => {
                log::debug!("Loaded config from {path:?}");
                config
            }
            Err(e) => {
                log::warn!("Unable to load config {path:?}, using defaults: {e}");
                Config::default()
            }
        }
    }

    pub fn event_queue_size(&self) -> usize {
        self.event_queue_size.unwrap_or(DEFAULT_QUEUE_SIZE)
    }

    pub fn fuse_joystick_devices(&self) -> bool {
        self.fuse_joystick_devices.unwrap_or(true)
    }

    /// Returns true if a device with the given name should not be enumerated
    pub fn is_ignored(&self, name: &str) -> bool {
        let Some(patterns) = self.ignore_devices.as_ref() else {
            return false;
        };
        patterns.iter().any(|pattern| glob_match(pattern.as_str(), name))
    }

    /// Returns the pump interval and capacity if devices should be pumped
    pub fn event_pump(&self) -> Option<(Duration, usize)> {
        let pump = self.event_pump.as_ref()?;
        let interval = pump.interval_ms.unwrap_or(DEFAULT_PUMP_INTERVAL_MS);
        let capacity = pump.capacity.unwrap_or(DEFAULT_PUMP_CAPACITY);
        Some((Duration::from_millis(interval), capacity))
    }

    pub fn rumble_enabled(&self) -> bool {
        self.rumble
            .as_ref()
            .and_then(|rumble| rumble.enabled)
            .unwrap_or(true)
    }

    /// Options for every controller built with this configuration
    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            event_queue_size: self.event_queue_size(),
            rumble: self.rumble_enabled(),
        }
    }
}
