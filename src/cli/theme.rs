//! Theme preference commands.

use clap::{Args, Subcommand};

use crate::cli::common::{CliError, CliResult};
use crate::preferences::{system_prefers_dark, FileStorage, ThemePreference};

/// Show or change the stored light/dark preference
#[derive(Debug, Clone, Args)]
pub struct ThemeArgs {
    /// Action to run
    #[command(subcommand)]
    pub command: ThemeCommand,
}

/// Theme subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum ThemeCommand {
    /// Print the current theme
    Show,
    /// Switch between light and dark
    Toggle,
    /// Set the theme explicitly
    Set {
        /// `light`, `dark`, or `system` to follow the OS setting
        #[arg(value_parser = ["light", "dark", "system"])]
        mode: String,
    },
}

const fn mode_name(dark: bool) -> &'static str {
    if dark {
        "dark"
    } else {
        "light"
    }
}

impl ThemeArgs {
    /// Execute the theme command
    pub fn execute(&self) -> CliResult<()> {
        let storage = FileStorage::in_config_dir()
            .map_err(|e| CliError::io(format!("Failed to locate preferences: {e:#}")))?;
        let mut theme = ThemePreference::load(storage);

        let dark = match &self.command {
            ThemeCommand::Show => theme.is_dark(),
            ThemeCommand::Toggle => theme
                .toggle()
                .map_err(|e| CliError::io(format!("{e:#}")))?,
            ThemeCommand::Set { mode } => theme
                .set_dark(match mode.as_str() {
                    "dark" => true,
                    "system" => system_prefers_dark(),
                    _ => false,
                })
                .map_err(|e| CliError::io(format!("{e:#}")))?,
        };

        println!("{}", mode_name(dark));
        Ok(())
    }
}
