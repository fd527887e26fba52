//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::models::CabinClass;
use crate::search::{FlightSource, JsonFlightSource, MockFlightSource};

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "FLIGHTFINDER_CONFIG_DIR";

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// JSON file of flight records used instead of the built-in flights
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flights_file: Option<PathBuf>,
}

/// Search behaviour configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Simulated retrieval latency in milliseconds
    #[serde(default = "default_latency_ms")]
    pub simulated_latency_ms: u64,
    /// Cabin class preselected in a new session
    #[serde(default)]
    pub default_cabin_class: CabinClass,
    /// Passenger count preselected in a new session
    #[serde(default = "default_passengers")]
    pub default_passengers: u32,
}

/// Default simulated latency (1.5 seconds)
fn default_latency_ms() -> u64 {
    1500
}

fn default_passengers() -> u32 {
    1
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            simulated_latency_ms: default_latency_ms(),
            default_cabin_class: CabinClass::default(),
            default_passengers: default_passengers(),
        }
    }
}

impl SearchConfig {
    /// Simulated latency as a duration.
    #[must_use]
    pub const fn latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}

/// UI preferences configuration.
///
/// The dark-mode flag is not stored here; it lives in the preference storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Display help on startup
    #[serde(default)]
    pub show_help_on_startup: bool,
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/FlightFinder/config.toml`
/// - macOS: `~/Library/Application Support/FlightFinder/config.toml`
/// - Windows: `%APPDATA%\FlightFinder\config.toml`
///
/// `FLIGHTFINDER_CONFIG_DIR` replaces the directory when set.
///
/// # Validation
///
/// - `flights_file` must exist when saved
/// - `default_passengers` must be at least 1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// Search settings
    #[serde(default)]
    pub search: SearchConfig,
    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|dir| !dir.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("FlightFinder");

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Gets the full path to the preference storage file.
    pub fn preferences_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("preferences.toml"))
    }

    /// Gets the full path to the log file.
    pub fn log_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("flightfinder.log"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration. A configured
    /// flights file that has since disappeared is kept with a warning; the
    /// search reports it, and `config set --clear-flights-file` can still
    /// load and repair the file.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate_values()?;
        if let Some(flights_file) = config.missing_flights_file() {
            warn!("Configured flights file is missing: {}", flights_file.display());
        }
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        // Ensure config directory exists
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values, including that the flights file exists.
    pub fn validate(&self) -> Result<()> {
        if let Some(flights_file) = self.missing_flights_file() {
            anyhow::bail!("Flights file does not exist: {}", flights_file.display());
        }

        self.validate_values()
    }

    /// Checks that do not touch the file system.
    fn validate_values(&self) -> Result<()> {
        if self.search.default_passengers == 0 {
            anyhow::bail!("Default passenger count must be at least 1");
        }

        Ok(())
    }

    fn missing_flights_file(&self) -> Option<&PathBuf> {
        self.paths
            .flights_file
            .as_ref()
            .filter(|flights_file| !flights_file.is_file())
    }

    /// Builds the flight source selected by this configuration.
    ///
    /// `override_path` (from the command line) wins over `paths.flights_file`.
    pub fn flight_source(&self, override_path: Option<&PathBuf>) -> Arc<dyn FlightSource> {
        match override_path.or(self.paths.flights_file.as_ref()) {
            Some(path) => Arc::new(JsonFlightSource::new(path)),
            None => Arc::new(MockFlightSource::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.paths.flights_file, None);
        assert_eq!(config.search.simulated_latency_ms, 1500);
        assert_eq!(config.search.default_cabin_class, CabinClass::Economy);
        assert_eq!(config.search.default_passengers, 1);
        assert!(!config.ui.show_help_on_startup);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate_flights_file() {
        let temp_dir = TempDir::new().unwrap();
        let flights = temp_dir.path().join("flights.json");

        let mut config = Config::new();
        config.paths.flights_file = Some(flights.clone());
        assert!(config.validate().is_err());

        fs::write(&flights, "[]").unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_keeps_missing_flights_file() {
        let temp_dir = TempDir::new().unwrap();
        let flights = temp_dir.path().join("gone.json");
        let content = format!("[paths]\nflights_file = {:?}\n", flights.display().to_string());
        let mut config: Config = toml::from_str(&content).unwrap();

        assert!(config.validate_values().is_ok());
        assert_eq!(config.missing_flights_file(), Some(&flights));
        assert!(config.validate().is_err());

        config.paths.flights_file = None;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate_passengers() {
        let mut config = Config::new();
        config.search.default_passengers = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let mut config = Config::new();
        config.search.default_cabin_class = CabinClass::Business;
        config.search.simulated_latency_ms = 0;

        let content = toml::to_string_pretty(&config).unwrap();
        assert!(content.contains("default_cabin_class = \"business\""));

        let loaded: Config = toml::from_str(&content).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_partial_file_uses_defaults() {
        let loaded: Config = toml::from_str("[search]\nsimulated_latency_ms = 10\n").unwrap();
        assert_eq!(loaded.search.simulated_latency_ms, 10);
        assert_eq!(loaded.search.default_passengers, 1);
        assert_eq!(loaded.paths, PathConfig::default());
    }

    #[test]
    fn test_flight_source_selection() {
        let config = Config::new();
        assert!(config.flight_source(None).describe().starts_with("built-in"));

        let path = PathBuf::from("/tmp/flights.json");
        assert_eq!(config.flight_source(Some(&path)).describe(), "/tmp/flights.json");
    }
}
