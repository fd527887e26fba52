//! Tracing subscriber setup.
//!
//! The TUI owns the terminal, so interactive sessions log to a file in the
//! config directory. Headless commands log to stderr.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::constants::LOG_ENV;

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Append to `flightfinder.log` in the config directory
    File,
    /// Write to stderr
    Stderr,
}

/// Filter from `FLIGHTFINDER_LOG`, else `debug` when verbose.
///
/// Stderr defaults to `warn` so headless output stays clean.
fn env_filter(target: LogTarget, verbose: bool) -> EnvFilter {
    let fallback = match (verbose, target) {
        (true, _) => "debug",
        (false, LogTarget::File) => "info",
        (false, LogTarget::Stderr) => "warn",
    };
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| fallback.into())
}

/// Installs the global subscriber. Safe to call once per process.
pub fn init(target: LogTarget, verbose: bool) -> Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter(target, verbose));

    match target {
        LogTarget::File => {
            let path = Config::log_file_path()?;
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).context(format!(
                    "Failed to create log directory: {}",
                    parent.display()
                ))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .context(format!("Failed to open log file: {}", path.display()))?;

            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
                .context("Failed to initialize logging")?;
        }
        LogTarget::Stderr => {
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to initialize logging")?;
        }
    }

    Ok(())
}
