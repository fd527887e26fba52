//! Shared fixtures for end-to-end CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Path to the flightfinder binary
pub fn flightfinder_bin() -> String {
    std::env::var("CARGO_BIN_EXE_flightfinder")
        .unwrap_or_else(|_| "target/debug/flightfinder".to_string())
}

/// Creates a Command with an isolated config directory.
///
/// Pass the same directory to several commands to share state between them.
pub fn isolated_command(args: &[&str], config_dir: &Path) -> Command {
    let mut cmd = Command::new(flightfinder_bin());
    cmd.env("FLIGHTFINDER_CONFIG_DIR", config_dir);
    cmd.env_remove("FLIGHTFINDER_LOG");
    cmd.args(args);
    cmd
}

/// Runs a command in an isolated config directory and returns its output.
pub fn run(args: &[&str], config_dir: &Path) -> Output {
    isolated_command(args, config_dir)
        .output()
        .expect("Failed to execute command")
}

/// Stdout of a finished command.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Stderr of a finished command.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Asserts an exit code, printing stderr on mismatch.
pub fn assert_exit(output: &Output, code: i32) {
    assert_eq!(
        output.status.code(),
        Some(code),
        "unexpected exit code. stdout: {} stderr: {}",
        stdout(output),
        stderr(output)
    );
}

/// Search arguments for the standard route, skipping the simulated latency.
pub fn search_args<'a>(extra: &[&'a str]) -> Vec<&'a str> {
    let mut args = vec![
        "search",
        "--from",
        "New York (JFK)",
        "--to",
        "Los Angeles (LAX)",
        "--date",
        "2026-11-02",
        "--instant",
    ];
    args.extend_from_slice(extra);
    args
}

/// Writes a flights file with five economy flights covering every stop
/// count and departure bucket.
pub fn write_flights_file(dir: &Path) -> PathBuf {
    let json = r#"[
  {
    "id": 1,
    "airline": "Alaska Airlines",
    "departureTime": "06:45 AM",
    "arrivalTime": "09:55 AM",
    "duration": "6h 10m",
    "price": 310,
    "stops": 0,
    "cabinClass": "economy",
    "airlineLogoRef": "images.example.com/alaska"
  },
  {
    "id": 2,
    "airline": "JetBlue",
    "departureTime": "01:20 PM",
    "arrivalTime": "07:05 PM",
    "duration": "8h 45m",
    "price": 245,
    "stops": 1,
    "cabinClass": "economy"
  },
  {
    "id": 3,
    "airline": "American Airlines",
    "departureTime": "07:30 PM",
    "arrivalTime": "01:40 AM",
    "duration": "9h 10m",
    "price": 199,
    "stops": 2,
    "cabinClass": "economy"
  },
  {
    "id": 4,
    "airline": "Spirit",
    "departureTime": "11:50 PM",
    "arrivalTime": "06:00 AM",
    "duration": "9h 10m",
    "price": 520,
    "stops": 3,
    "cabinClass": "economy"
  },
  {
    "id": 5,
    "airline": "Emirates",
    "departureTime": "09:00 AM",
    "arrivalTime": "12:00 PM",
    "duration": "6h 0m",
    "price": 1450,
    "stops": 0,
    "cabinClass": "first"
  }
]"#;
    let path = dir.join("flights.json");
    fs::write(&path, json).expect("Failed to write flights file");
    path
}
