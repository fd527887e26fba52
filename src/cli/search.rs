//! Headless flight search.

use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::models::{
    flight::clock, CabinClass, CriteriaUpdate, DepartureTimeBucket, FilterPreferences,
    FilterUpdate, FlightRecord, PriceRange, SearchCriteria, SortKey, StopsFilter,
};
use crate::preferences::{ViewMode, ViewPreference};
use crate::search::{derive_results, SearchState};

/// Extra time allowed beyond the simulated latency before giving up.
const WAIT_MARGIN: Duration = Duration::from_secs(10);

/// Search flights and print the filtered results
#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// Departure location
    #[arg(long = "from", value_name = "LOCATION")]
    pub departure: String,

    /// Destination location
    #[arg(long = "to", value_name = "LOCATION")]
    pub destination: String,

    /// Departure date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub date: String,

    /// Return date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub return_date: Option<String>,

    /// Number of passengers
    #[arg(long)]
    pub passengers: Option<u32>,

    /// Cabin class (economy, premium, business, first)
    #[arg(long, value_name = "CLASS")]
    pub cabin: Option<CabinClass>,

    /// Minimum price
    #[arg(long, default_value_t = 0)]
    pub min_price: u32,

    /// Maximum price
    #[arg(long, default_value_t = crate::models::filters::DEFAULT_MAX_PRICE)]
    pub max_price: u32,

    /// Stops filter (all, 0, 1, 2+)
    #[arg(long, default_value = "all")]
    pub stops: StopsFilter,

    /// Departure time (all, morning, afternoon, evening)
    #[arg(long, default_value = "all")]
    pub time: DepartureTimeBucket,

    /// Sort key (price, duration, departure, arrival)
    #[arg(long, default_value = "price")]
    pub sort: SortKey,

    /// Card layout for text output (grid or list)
    #[arg(long, default_value = "grid")]
    pub view: ViewMode,

    /// JSON file of flight records to search instead of the configured source
    #[arg(long, value_name = "FILE")]
    pub flights: Option<PathBuf>,

    /// Skip the simulated latency
    #[arg(long)]
    pub instant: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON response for a search.
#[derive(Debug, Serialize)]
struct SearchResponse<'a> {
    criteria: &'a SearchCriteria,
    filters: &'a FilterPreferences,
    count: usize,
    flights: &'a [FlightRecord],
}

impl SearchArgs {
    /// Builds the criteria from the arguments and config defaults.
    pub fn criteria(&self, config: &Config) -> SearchCriteria {
        let mut criteria = SearchCriteria::new();
        criteria.update(CriteriaUpdate::Departure(self.departure.clone()));
        criteria.update(CriteriaUpdate::Destination(self.destination.clone()));
        criteria.update(CriteriaUpdate::DepartureDate(self.date.clone()));
        criteria.update(CriteriaUpdate::ReturnDate(self.return_date.clone()));
        criteria.update(CriteriaUpdate::Passengers(
            self.passengers.unwrap_or(config.search.default_passengers),
        ));
        criteria.update(CriteriaUpdate::CabinClass(
            self.cabin.unwrap_or(config.search.default_cabin_class),
        ));
        criteria
    }

    /// Builds the filters from the arguments.
    pub fn filters(&self) -> CliResult<FilterPreferences> {
        let range = PriceRange::new(self.min_price, self.max_price)
            .map_err(|e| CliError::validation(e.to_string()))?;

        let mut filters = FilterPreferences::new();
        filters.update(FilterUpdate::PriceRange(range));
        filters.update(FilterUpdate::Stops(self.stops));
        filters.update(FilterUpdate::DepartureTime(self.time));
        filters.update(FilterUpdate::SortBy(self.sort));
        Ok(filters)
    }

    /// Execute the search command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        let criteria = self.criteria(&config);
        let filters = self.filters()?;

        let latency = if self.instant {
            Duration::ZERO
        } else {
            config.search.latency()
        };
        let mut search = SearchState::new(config.flight_source(self.flights.as_ref()), latency);

        search
            .submit(&criteria)
            .map_err(|e| CliError::validation(e.to_string()))?;

        if !search.wait(latency + WAIT_MARGIN) {
            search.cancel();
            return Err(CliError::io("Search timed out"));
        }
        if let Some(error) = &search.last_error {
            return Err(CliError::io(format!("Search failed: {error}")));
        }

        let results = derive_results(&search.flights, &criteria, &filters);

        if self.json {
            let response = SearchResponse {
                criteria: &criteria,
                filters: &filters,
                count: results.len(),
                flights: &results,
            };
            let json = serde_json::to_string_pretty(&response)
                .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
            println!("{json}");
        } else {
            let mut view = ViewPreference::new();
            if self.view == ViewMode::List {
                view.set_list();
            }
            print!("{}", format_results(&results, &criteria, view.mode()));
        }

        Ok(())
    }
}

/// Plain-text rendering of the result set in the given view.
#[must_use]
pub fn format_results(results: &[FlightRecord], criteria: &SearchCriteria, mode: ViewMode) -> String {
    if results.is_empty() {
        return "No flights match your search.\n".to_string();
    }

    let mut out = format!(
        "{} flight(s) from {} to {}\n\n",
        results.len(),
        criteria.departure,
        criteria.destination
    );

    for flight in results {
        match mode {
            ViewMode::Grid => {
                out.push_str(&format!("┌ {} ({})\n", flight.airline, flight.cabin_class));
                out.push_str(&format!(
                    "│ {} {}  →  {} {}\n",
                    clock::format(&flight.departure_time),
                    criteria.departure,
                    clock::format(&flight.arrival_time),
                    criteria.destination
                ));
                out.push_str(&format!(
                    "│ {} · {}\n",
                    flight.duration,
                    flight.stops_label()
                ));
                out.push_str(&format!("└ ${}\n\n", flight.price));
            }
            ViewMode::List => {
                out.push_str(&format!(
                    "{:<18} {:<9} {:>8} → {:>8}  {:>7}  {:<9} ${}\n",
                    flight.airline,
                    flight.cabin_class,
                    clock::format(&flight.departure_time),
                    clock::format(&flight.arrival_time),
                    flight.duration.to_string(),
                    flight.stops_label(),
                    flight.price
                ));
            }
        }
    }

    out
}
