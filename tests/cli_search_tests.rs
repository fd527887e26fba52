//! End-to-end tests for `flightfinder search`.

use tempfile::TempDir;

mod fixtures;
use fixtures::*;

// ============================================================================
// Built-in Flights
// ============================================================================

#[test]
fn test_search_builtin_grid() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(&search_args(&[]), temp_dir.path());

    assert_exit(&output, 0);
    let out = stdout(&output);
    assert!(out.starts_with("1 flight(s) from New York (JFK) to Los Angeles (LAX)"));
    assert!(out.contains("┌ Delta Airlines (economy)"));
    assert!(out.contains("3h 30m · Non-stop"));
    assert!(out.contains("└ $450"));
    // United flies business and is excluded by the default cabin
    assert!(!out.contains("United Airlines"));
}

#[test]
fn test_search_builtin_business_list() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(
        &search_args(&["--cabin", "business", "--view", "list"]),
        temp_dir.path(),
    );

    assert_exit(&output, 0);
    let out = stdout(&output);
    assert!(out.contains("United Airlines"));
    assert!(out.contains("1 stop"));
    assert!(out.contains("$380"));
    assert!(!out.contains('┌'), "list view should not draw cards");
}

#[test]
fn test_search_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(&search_args(&["--json"]), temp_dir.path());

    assert_exit(&output, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["count"], 1);
    assert_eq!(json["criteria"]["departure"], "New York (JFK)");
    assert_eq!(json["criteria"]["cabin_class"], "economy");
    assert_eq!(json["flights"][0]["airline"], "Delta Airlines");
    assert_eq!(json["flights"][0]["departureTime"], "08:00 AM");
    assert_eq!(json["flights"][0]["duration"], "3h 30m");
}

#[test]
fn test_search_no_matches() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(&search_args(&["--max-price", "100"]), temp_dir.path());

    assert_exit(&output, 0);
    assert_eq!(stdout(&output), "No flights match your search.\n");
}

// ============================================================================
// Flights File and Filters
// ============================================================================

#[test]
fn test_search_flights_file_sorted_by_price() {
    let temp_dir = TempDir::new().unwrap();
    let flights = write_flights_file(temp_dir.path());
    let flights = flights.to_str().unwrap();

    let output = run(&search_args(&["--flights", flights, "--json"]), temp_dir.path());

    assert_exit(&output, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let airlines: Vec<&str> = json["flights"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["airline"].as_str().unwrap())
        .collect();
    assert_eq!(
        airlines,
        ["American Airlines", "JetBlue", "Alaska Airlines", "Spirit"]
    );
}

#[test]
fn test_search_sort_by_duration_is_stable() {
    let temp_dir = TempDir::new().unwrap();
    let flights = write_flights_file(temp_dir.path());
    let flights = flights.to_str().unwrap();

    let output = run(
        &search_args(&["--flights", flights, "--sort", "duration", "--json"]),
        temp_dir.path(),
    );

    assert_exit(&output, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let ids: Vec<u64> = json["flights"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["id"].as_u64().unwrap())
        .collect();
    // American and Spirit tie on 9h 10m and keep file order
    assert_eq!(ids, [1, 2, 3, 4]);
}

#[test]
fn test_search_two_or_more_stops() {
    let temp_dir = TempDir::new().unwrap();
    let flights = write_flights_file(temp_dir.path());
    let flights = flights.to_str().unwrap();

    let output = run(
        &search_args(&["--flights", flights, "--stops", "2+", "--json"]),
        temp_dir.path(),
    );

    assert_exit(&output, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["count"], 2);
    assert_eq!(json["flights"][0]["stops"], 2);
    assert_eq!(json["flights"][1]["stops"], 3);
}

#[test]
fn test_search_departure_time_and_price() {
    let temp_dir = TempDir::new().unwrap();
    let flights = write_flights_file(temp_dir.path());
    let flights = flights.to_str().unwrap();

    let evening = run(
        &search_args(&["--flights", flights, "--time", "evening", "--json"]),
        temp_dir.path(),
    );
    assert_exit(&evening, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout(&evening)).unwrap();
    assert_eq!(json["count"], 2);

    let priced = run(
        &search_args(&[
            "--flights",
            flights,
            "--min-price",
            "245",
            "--max-price",
            "310",
            "--json",
        ]),
        temp_dir.path(),
    );
    assert_exit(&priced, 0);
    let json: serde_json::Value = serde_json::from_str(&stdout(&priced)).unwrap();
    assert_eq!(json["count"], 2);
    assert_eq!(json["flights"][0]["airline"], "JetBlue");
    assert_eq!(json["flights"][1]["airline"], "Alaska Airlines");
}

#[test]
fn test_search_first_class_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let flights = write_flights_file(temp_dir.path());
    let flights = flights.to_str().unwrap();

    let output = run(
        &search_args(&["--flights", flights, "--cabin", "first"]),
        temp_dir.path(),
    );

    assert_exit(&output, 0);
    let out = stdout(&output);
    assert!(out.contains("Emirates (first)"));
    assert!(out.contains("$1450"));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_search_missing_route_is_validation_error() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(
        &[
            "search", "--from", " ", "--to", "Paris", "--date", "2026-11-02", "--instant",
        ],
        temp_dir.path(),
    );

    assert_exit(&output, 1);
    assert!(stderr(&output).contains("Departure is required"));
}

#[test]
fn test_search_return_before_departure() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(
        &search_args(&["--return-date", "2026-10-30"]),
        temp_dir.path(),
    );

    assert_exit(&output, 1);
    assert!(stderr(&output).contains("before departure date"));
}

#[test]
fn test_search_inverted_price_range() {
    let temp_dir = TempDir::new().unwrap();
    let output = run(
        &search_args(&["--min-price", "900", "--max-price", "100"]),
        temp_dir.path(),
    );

    assert_exit(&output, 1);
}

#[test]
fn test_search_missing_flights_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.json");

    let output = run(
        &search_args(&["--flights", missing.to_str().unwrap()]),
        temp_dir.path(),
    );

    assert_exit(&output, 2);
    assert!(stderr(&output).contains("Search failed"));
}

#[test]
fn test_search_uses_config_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let set = run(
        &["config", "set", "--cabin", "business", "--latency-ms", "0"],
        temp_dir.path(),
    );
    assert_exit(&set, 0);

    let output = run(
        &[
            "search",
            "--from",
            "New York (JFK)",
            "--to",
            "Los Angeles (LAX)",
            "--date",
            "2026-11-02",
        ],
        temp_dir.path(),
    );

    assert_exit(&output, 0);
    assert!(stdout(&output).contains("United Airlines (business)"));
}
