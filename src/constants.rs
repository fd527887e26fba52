//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and version information.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "FlightFinder";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "flightfinder";

/// Environment variable holding the log filter (e.g. `debug`, `flightfinder=trace`).
pub const LOG_ENV: &str = "FLIGHTFINDER_LOG";
