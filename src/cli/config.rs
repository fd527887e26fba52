//! Configuration commands.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::models::CabinClass;

/// Show or edit `config.toml`
#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    /// Action to run
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show {
        /// Output as JSON instead of TOML
        #[arg(long)]
        json: bool,
    },
    /// Print the config directory path
    Path,
    /// Update one or more settings
    Set(ConfigSetArgs),
}

/// Settings accepted by `config set`.
#[derive(Debug, Clone, Args)]
pub struct ConfigSetArgs {
    /// JSON file of flight records to search
    #[arg(long, value_name = "FILE", conflicts_with = "clear_flights_file")]
    pub flights_file: Option<PathBuf>,

    /// Go back to the built-in flights
    #[arg(long)]
    pub clear_flights_file: bool,

    /// Simulated search latency in milliseconds
    #[arg(long, value_name = "MS")]
    pub latency_ms: Option<u64>,

    /// Default cabin class
    #[arg(long, value_name = "CLASS")]
    pub cabin: Option<CabinClass>,

    /// Default passenger count
    #[arg(long)]
    pub passengers: Option<u32>,

    /// Show the help overlay when the TUI starts
    #[arg(long, value_name = "BOOL")]
    pub show_help: Option<bool>,
}

impl ConfigSetArgs {
    /// Applies the given settings. Returns false if nothing was given.
    fn apply(&self, config: &mut Config) -> bool {
        let mut changed = false;

        if let Some(path) = &self.flights_file {
            config.paths.flights_file = Some(path.clone());
            changed = true;
        }
        if self.clear_flights_file {
            config.paths.flights_file = None;
            changed = true;
        }
        if let Some(latency) = self.latency_ms {
            config.search.simulated_latency_ms = latency;
            changed = true;
        }
        if let Some(cabin) = self.cabin {
            config.search.default_cabin_class = cabin;
            changed = true;
        }
        if let Some(passengers) = self.passengers {
            config.search.default_passengers = passengers;
            changed = true;
        }
        if let Some(show_help) = self.show_help {
            config.ui.show_help_on_startup = show_help;
            changed = true;
        }

        changed
    }
}

impl ConfigArgs {
    /// Execute the config command
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show { json } => {
                let config = load()?;
                let output = if *json {
                    serde_json::to_string_pretty(&config)
                        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
                } else {
                    toml::to_string_pretty(&config)
                        .map_err(|e| CliError::io(format!("Failed to serialize TOML: {e}")))?
                };
                println!("{}", output.trim_end());
            }
            ConfigCommand::Path => {
                let dir = Config::config_dir()
                    .map_err(|e| CliError::io(format!("{e:#}")))?;
                println!("{}", dir.display());
            }
            ConfigCommand::Set(args) => {
                let mut config = load()?;
                if !args.apply(&mut config) {
                    return Err(CliError::validation("No settings given"));
                }
                config
                    .validate()
                    .map_err(|e| CliError::validation(format!("{e:#}")))?;
                config
                    .save()
                    .map_err(|e| CliError::io(format!("{e:#}")))?;
                println!("Configuration saved");
            }
        }

        Ok(())
    }
}

fn load() -> CliResult<Config> {
    Config::load().map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_args() -> ConfigSetArgs {
        ConfigSetArgs {
            flights_file: None,
            clear_flights_file: false,
            latency_ms: None,
            cabin: None,
            passengers: None,
            show_help: None,
        }
    }

    #[test]
    fn test_apply_nothing() {
        let mut config = Config::new();
        assert!(!set_args().apply(&mut config));
        assert_eq!(config, Config::new());
    }

    #[test]
    fn test_apply_fields() {
        let mut config = Config::new();
        let args = ConfigSetArgs {
            latency_ms: Some(0),
            cabin: Some(CabinClass::First),
            passengers: Some(3),
            show_help: Some(true),
            ..set_args()
        };
        assert!(args.apply(&mut config));
        assert_eq!(config.search.simulated_latency_ms, 0);
        assert_eq!(config.search.default_cabin_class, CabinClass::First);
        assert_eq!(config.search.default_passengers, 3);
        assert!(config.ui.show_help_on_startup);
    }

    #[test]
    fn test_clear_flights_file() {
        let mut config = Config::new();
        config.paths.flights_file = Some(PathBuf::from("flights.json"));
        let args = ConfigSetArgs {
            clear_flights_file: true,
            ..set_args()
        };
        assert!(args.apply(&mut config));
        assert_eq!(config.paths.flights_file, None);
    }
}
