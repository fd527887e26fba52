//! Search criteria entered through the search form.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Date format used by the departure and return date fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Cabin class shared by search criteria and flight records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CabinClass {
    /// Economy cabin
    #[default]
    Economy,
    /// Premium economy cabin
    Premium,
    /// Business cabin
    Business,
    /// First class cabin
    First,
}

impl CabinClass {
    /// All cabin classes in form display order.
    pub const ALL: [Self; 4] = [Self::Economy, Self::Premium, Self::Business, Self::First];

    /// Identifier used in config files, CLI arguments and data files.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Economy => "economy",
            Self::Premium => "premium",
            Self::Business => "business",
            Self::First => "first",
        }
    }

    /// Human-readable label shown in the cabin class selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Economy => "Economy",
            Self::Premium => "Premium Economy",
            Self::Business => "Business",
            Self::First => "First Class",
        }
    }

    /// Next class in display order, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Economy => Self::Premium,
            Self::Premium => Self::Business,
            Self::Business => Self::First,
            Self::First => Self::Economy,
        }
    }

    /// Previous class in display order, wrapping around.
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Economy => Self::First,
            Self::Premium => Self::Economy,
            Self::Business => Self::Premium,
            Self::First => Self::Business,
        }
    }
}

impl fmt::Display for CabinClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for CabinClass {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|class| class.id().eq_ignore_ascii_case(s.trim()))
            .with_context(|| {
                format!("Invalid cabin class '{s}'. Must be economy, premium, business or first")
            })
    }
}

/// Known airport locations offered as suggestions in the route fields.
pub const KNOWN_LOCATIONS: [&str; 8] = [
    "New York (JFK)",
    "Los Angeles (LAX)",
    "Chicago (ORD)",
    "San Francisco (SFO)",
    "Miami (MIA)",
    "London (LHR)",
    "Paris (CDG)",
    "Tokyo (HND)",
];

/// Returns the known locations containing `input` (case-insensitive).
#[must_use]
pub fn suggest_locations(input: &str) -> Vec<&'static str> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    KNOWN_LOCATIONS
        .into_iter()
        .filter(|location| location.to_lowercase().contains(&needle))
        .collect()
}

/// Named field of [`SearchCriteria`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriteriaField {
    /// Departure location
    Departure,
    /// Destination location
    Destination,
    /// Outbound date
    DepartureDate,
    /// Optional return date
    ReturnDate,
    /// Passenger count
    Passengers,
    /// Cabin class
    CabinClass,
}

impl CriteriaField {
    /// Form order of the fields.
    pub const ALL: [Self; 6] = [
        Self::Departure,
        Self::Destination,
        Self::DepartureDate,
        Self::ReturnDate,
        Self::Passengers,
        Self::CabinClass,
    ];

    /// Key used by the string-keyed setter.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Departure => "departure",
            Self::Destination => "destination",
            Self::DepartureDate => "departure_date",
            Self::ReturnDate => "return_date",
            Self::Passengers => "passengers",
            Self::CabinClass => "cabin_class",
        }
    }

    /// Form label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Departure => "Departure",
            Self::Destination => "Destination",
            Self::DepartureDate => "Date",
            Self::ReturnDate => "Return",
            Self::Passengers => "Passengers",
            Self::CabinClass => "Cabin Class",
        }
    }

    /// Looks a field up by key. Accepts the camelCase names used by the web form too.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "departure" => Some(Self::Departure),
            "destination" => Some(Self::Destination),
            "departure_date" | "departureDate" | "date" => Some(Self::DepartureDate),
            "return_date" | "returnDate" => Some(Self::ReturnDate),
            "passengers" => Some(Self::Passengers),
            "cabin_class" | "cabinClass" | "cabin" => Some(Self::CabinClass),
            _ => None,
        }
    }
}

/// Replacement value for exactly one field of [`SearchCriteria`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CriteriaUpdate {
    /// New departure location
    Departure(String),
    /// New destination location
    Destination(String),
    /// New outbound date string
    DepartureDate(String),
    /// New return date string, `None` for one-way
    ReturnDate(Option<String>),
    /// New passenger count
    Passengers(u32),
    /// New cabin class
    CabinClass(CabinClass),
}

/// Primary search input: route, dates, passengers and cabin class.
///
/// Field updates never validate; [`SearchCriteria::validate`] runs at submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Departure location
    pub departure: String,
    /// Destination location
    pub destination: String,
    /// Outbound date (`YYYY-MM-DD`)
    pub departure_date: String,
    /// Return date (`YYYY-MM-DD`), absent for one-way searches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<String>,
    /// Number of travellers
    pub passengers: u32,
    /// Requested cabin class
    pub cabin_class: CabinClass,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            departure: String::new(),
            destination: String::new(),
            departure_date: String::new(),
            return_date: None,
            passengers: 1,
            cabin_class: CabinClass::default(),
        }
    }
}

impl SearchCriteria {
    /// Creates criteria with session defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces exactly one field, leaving the others untouched.
    pub fn update(&mut self, update: CriteriaUpdate) {
        match update {
            CriteriaUpdate::Departure(value) => self.departure = value,
            CriteriaUpdate::Destination(value) => self.destination = value,
            CriteriaUpdate::DepartureDate(value) => self.departure_date = value,
            CriteriaUpdate::ReturnDate(value) => self.return_date = value,
            CriteriaUpdate::Passengers(value) => self.passengers = value,
            CriteriaUpdate::CabinClass(value) => self.cabin_class = value,
        }
    }

    /// String-keyed setter used by the CLI and form editors.
    ///
    /// Fails on an unknown key or a value that cannot be represented
    /// (non-numeric passengers, unknown cabin class). Nothing is changed on failure.
    pub fn set_field(&mut self, key: &str, value: &str) -> Result<()> {
        let field = CriteriaField::from_key(key)
            .with_context(|| format!("Unknown search field '{key}'"))?;
        let update = match field {
            CriteriaField::Departure => CriteriaUpdate::Departure(value.to_string()),
            CriteriaField::Destination => CriteriaUpdate::Destination(value.to_string()),
            CriteriaField::DepartureDate => CriteriaUpdate::DepartureDate(value.to_string()),
            CriteriaField::ReturnDate => CriteriaUpdate::ReturnDate(
                Some(value.to_string()).filter(|v| !v.trim().is_empty()),
            ),
            CriteriaField::Passengers => CriteriaUpdate::Passengers(
                value
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid passenger count '{value}'"))?,
            ),
            CriteriaField::CabinClass => CriteriaUpdate::CabinClass(value.parse()?),
        };
        self.update(update);
        Ok(())
    }

    /// Text shown in the form for a field.
    #[must_use]
    pub fn field_text(&self, field: CriteriaField) -> String {
        match field {
            CriteriaField::Departure => self.departure.clone(),
            CriteriaField::Destination => self.destination.clone(),
            CriteriaField::DepartureDate => self.departure_date.clone(),
            CriteriaField::ReturnDate => self.return_date.clone().unwrap_or_default(),
            CriteriaField::Passengers => self.passengers.to_string(),
            CriteriaField::CabinClass => self.cabin_class.label().to_string(),
        }
    }

    /// Whether the required fields are filled in.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        self.validate().is_ok()
    }

    /// Validates the criteria for submission.
    pub fn validate(&self) -> Result<(), String> {
        if self.departure.trim().is_empty() {
            return Err("Departure is required".to_string());
        }
        if self.destination.trim().is_empty() {
            return Err("Destination is required".to_string());
        }
        if self.departure_date.trim().is_empty() {
            return Err("Departure date is required".to_string());
        }

        let outbound = parse_date(&self.departure_date)?;
        if let Some(return_date) = &self.return_date {
            let inbound = parse_date(return_date)?;
            if inbound < outbound {
                return Err(format!(
                    "Return date {inbound} is before departure date {outbound}"
                ));
            }
        }

        if self.passengers == 0 {
            return Err("At least one passenger is required".to_string());
        }

        Ok(())
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| format!("Invalid date '{value}', expected YYYY-MM-DD"))
}
