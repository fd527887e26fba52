//! CLI command handlers for FlightFinder.
//!
//! Headless, scriptable access to search, theme and configuration for
//! automation and testing.

pub mod common;
pub mod config;
pub mod search;
pub mod theme;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use search::SearchArgs;
pub use theme::ThemeArgs;
