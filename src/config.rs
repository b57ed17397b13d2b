//! Configuration management for the bench simulator.
//!
//! Protocol constants (schema names, channel count, the test-mode update
//! period) are compile-time constants in [`crate::schema`]; settings here
//! only shape the simulated bench: which board family to emulate and how the
//! mock registry's channel ranges are seeded.

use crate::error::PanelError;
use crate::validation::{is_in_range, is_valid_log_level};
use config::Config;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub log_level: String,
    pub simulator: SimulatorSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SimulatorSettings {
    /// Board model code the simulated session reports.
    pub board_model: u16,
    pub channel_min: i32,
    pub channel_max: i32,
    pub channel_neutral: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            simulator: SimulatorSettings::default(),
        }
    }
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        Self {
            board_model: 0x0401,
            channel_min: 1000,
            channel_max: 2000,
            channel_neutral: 1500,
        }
    }
}

impl Settings {
    /// Load settings from `config/<name>.toml`, falling back to built-in
    /// defaults when the file does not exist.
    pub fn new(config_name: Option<&str>) -> Result<Self, PanelError> {
        let config_path = format!("config/{}", config_name.unwrap_or("default"));
        let s = Config::builder()
            .add_source(config::File::with_name(&config_path).required(false))
            .build()
            .map_err(PanelError::Config)?;

        let settings: Settings = s.try_deserialize().map_err(PanelError::Config)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from an explicit file path.
    pub fn from_file(path: &Path) -> Result<Self, PanelError> {
        let s = Config::builder()
            .add_source(config::File::from(path))
            .build()
            .map_err(PanelError::Config)?;

        let settings: Settings = s.try_deserialize().map_err(PanelError::Config)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Semantic checks beyond what parsing enforces.
    pub fn validate(&self) -> Result<(), PanelError> {
        is_valid_log_level(&self.log_level)
            .map_err(|e| PanelError::Configuration(e.to_string()))?;

        let sim = &self.simulator;
        if sim.channel_min > sim.channel_max {
            return Err(PanelError::Configuration(format!(
                "channel_min {} exceeds channel_max {}",
                sim.channel_min, sim.channel_max
            )));
        }
        is_in_range(sim.channel_neutral, sim.channel_min..=sim.channel_max)
            .map_err(|e| PanelError::Configuration(format!("channel_neutral: {e}")))?;

        Ok(())
    }
}
