//! End-to-end tests for `flightfinder config` commands.

use std::fs;
use tempfile::TempDir;

mod fixtures;
use fixtures::*;

// ============================================================================
// Show / Path
// ============================================================================

#[test]
fn test_config_show_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(&["config", "show"], temp_dir.path());

    assert_exit(&output, 0);
    let out = stdout(&output);
    assert!(out.contains("[search]"));
    assert!(out.contains("simulated_latency_ms = 1500"));
    assert!(out.contains("default_cabin_class = \"economy\""));
    assert!(!out.contains("flights_file"));
}

#[test]
fn test_config_show_json() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(&["config", "show", "--json"], temp_dir.path());

    assert_exit(&output, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["search"]["default_passengers"], 1);
    assert_eq!(json["ui"]["show_help_on_startup"], false);
}

#[test]
fn test_config_path_uses_override() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(&["config", "path"], temp_dir.path());

    assert_exit(&output, 0);
    assert_eq!(stdout(&output).trim(), temp_dir.path().display().to_string());
}

// ============================================================================
// Set
// ============================================================================

#[test]
fn test_config_set_persists() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(
        &[
            "config",
            "set",
            "--latency-ms",
            "250",
            "--passengers",
            "3",
            "--cabin",
            "premium",
            "--show-help",
            "true",
        ],
        temp_dir.path(),
    );

    assert_exit(&output, 0);
    assert!(stdout(&output).contains("Configuration saved"));

    let content = fs::read_to_string(temp_dir.path().join("config.toml")).unwrap();
    assert!(content.contains("simulated_latency_ms = 250"));
    assert!(content.contains("default_passengers = 3"));
    assert!(content.contains("default_cabin_class = \"premium\""));
    assert!(content.contains("show_help_on_startup = true"));
}

#[test]
fn test_config_set_flights_file_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let flights = write_flights_file(temp_dir.path());

    let set = run(
        &["config", "set", "--flights-file", flights.to_str().unwrap()],
        temp_dir.path(),
    );
    assert_exit(&set, 0);

    let show = run(&["config", "show", "--json"], temp_dir.path());
    let json: serde_json::Value = serde_json::from_str(&stdout(&show)).unwrap();
    assert_eq!(json["paths"]["flights_file"], flights.to_str().unwrap());

    // The configured file now feeds searches
    let search = run(&search_args(&["--json"]), temp_dir.path());
    assert_exit(&search, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout(&search)).unwrap();
    assert_eq!(json["count"], 4);

    let clear = run(&["config", "set", "--clear-flights-file"], temp_dir.path());
    assert_exit(&clear, 0);
    let show = run(&["config", "show"], temp_dir.path());
    assert!(!stdout(&show).contains("flights_file"));
}

#[test]
fn test_config_recovers_from_deleted_flights_file() {
    let temp_dir = TempDir::new().unwrap();
    let flights = write_flights_file(temp_dir.path());

    let set = run(
        &["config", "set", "--flights-file", flights.to_str().unwrap()],
        temp_dir.path(),
    );
    assert_exit(&set, 0);
    fs::remove_file(&flights).unwrap();

    // Loading still works; the search reports the missing file
    let show = run(&["config", "show"], temp_dir.path());
    assert_exit(&show, 0);
    assert!(stdout(&show).contains("flights_file"));

    let search = run(&search_args(&[]), temp_dir.path());
    assert_exit(&search, 2);
    assert!(stderr(&search).contains("Search failed"));

    let clear = run(&["config", "set", "--clear-flights-file"], temp_dir.path());
    assert_exit(&clear, 0);

    let search = run(&search_args(&[]), temp_dir.path());
    assert_exit(&search, 0);
    assert!(stdout(&search).contains("Delta Airlines"));
}

#[test]
fn test_config_set_nothing_is_validation_error() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(&["config", "set"], temp_dir.path());

    assert_exit(&output, 1);
    assert!(stderr(&output).contains("No settings given"));
}

#[test]
fn test_config_set_zero_passengers_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(&["config", "set", "--passengers", "0"], temp_dir.path());

    assert_exit(&output, 1);
    assert!(!temp_dir.path().join("config.toml").exists());
}

#[test]
fn test_config_set_missing_flights_file_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.json");

    let output = run(
        &["config", "set", "--flights-file", missing.to_str().unwrap()],
        temp_dir.path(),
    );

    assert_exit(&output, 1);
    assert!(stderr(&output).contains("Flights file does not exist"));
}

#[test]
fn test_config_conflicting_flights_flags() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(
        &[
            "config",
            "set",
            "--flights-file",
            "a.json",
            "--clear-flights-file",
        ],
        temp_dir.path(),
    );

    assert!(!output.status.success());
}

#[test]
fn test_config_malformed_file_is_validation_error() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("config.toml"), "[search\nbroken").unwrap();

    let output = run(&["config", "show"], temp_dir.path());
    assert_exit(&output, 1);
}
