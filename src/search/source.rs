//! Flight data sources queried by a search.

use anyhow::{Context, Result};
use chrono::NaiveTime;
use std::fs;
use std::path::PathBuf;

use crate::models::{CabinClass, FlightDuration, FlightRecord, SearchCriteria};

/// Provider of flight records for a search.
///
/// Implementations run on the search worker thread, hence `Send + Sync`.
pub trait FlightSource: Send + Sync {
    /// Returns the flights available for the criteria, in the provider's natural order.
    fn query(&self, criteria: &SearchCriteria) -> Result<Vec<FlightRecord>>;

    /// Short description shown in the status bar and logs.
    fn describe(&self) -> String;
}

/// Built-in static flights.
#[derive(Debug, Clone)]
pub struct MockFlightSource {
    flights: Vec<FlightRecord>,
}

impl MockFlightSource {
    /// Creates the source with the two built-in flights.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flights: builtin_flights(),
        }
    }

    /// Creates a source over arbitrary records.
    #[must_use]
    pub fn with_flights(flights: Vec<FlightRecord>) -> Self {
        Self { flights }
    }
}

impl Default for MockFlightSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FlightSource for MockFlightSource {
    fn query(&self, _criteria: &SearchCriteria) -> Result<Vec<FlightRecord>> {
        Ok(self.flights.clone())
    }

    fn describe(&self) -> String {
        format!("built-in flights ({})", self.flights.len())
    }
}

/// Flights read from a JSON array on disk.
///
/// The file is re-read on every query so edits show up on the next search.
#[derive(Debug, Clone)]
pub struct JsonFlightSource {
    path: PathBuf,
}

impl JsonFlightSource {
    /// Creates a source reading `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FlightSource for JsonFlightSource {
    fn query(&self, _criteria: &SearchCriteria) -> Result<Vec<FlightRecord>> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read flights file: {}", self.path.display()))?;
        let flights: Vec<FlightRecord> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse flights file: {}", self.path.display()))?;
        Ok(flights)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// The two flights shipped with the application.
#[must_use]
pub fn builtin_flights() -> Vec<FlightRecord> {
    vec![
        FlightRecord {
            id: 1,
            airline: "Delta Airlines".to_string(),
            departure_time: hm(8, 0),
            arrival_time: hm(11, 30),
            duration: FlightDuration::from_hm(3, 30),
            price: 450,
            stops: 0,
            cabin_class: CabinClass::Economy,
            airline_logo_ref: "images.unsplash.com/photo-1436491865332-7a61a109cc05".to_string(),
        },
        FlightRecord {
            id: 2,
            airline: "United Airlines".to_string(),
            departure_time: hm(10, 15),
            arrival_time: hm(14, 45),
            duration: FlightDuration::from_hm(4, 30),
            price: 380,
            stops: 1,
            cabin_class: CabinClass::Business,
            airline_logo_ref: "images.unsplash.com/photo-1556388158-158ea5ccacbd".to_string(),
        },
    ]
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}
