//! FlightFinder Library
//!
//! Core functionality for the FlightFinder application: search criteria and
//! filter state, background flight searches over a pluggable source, result
//! derivation, the persisted theme preference, and the terminal UI.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod logging;
pub mod models;
pub mod preferences;
pub mod search;
pub mod shortcuts;
pub mod tui;
