//! Secondary refinement filters applied after the criteria match.

use anyhow::{bail, Context, Result};
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default upper bound of the price filter.
pub const DEFAULT_MAX_PRICE: u32 = 2000;

/// Step used when the price bounds are nudged from the filter panel.
pub const PRICE_STEP: u32 = 50;

/// Inclusive price range. The constructor keeps `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "[u32; 2]", into = "[u32; 2]")]
pub struct PriceRange {
    min: u32,
    max: u32,
}

impl PriceRange {
    /// Creates a range, rejecting `min > max`.
    pub fn new(min: u32, max: u32) -> Result<Self> {
        if min > max {
            bail!("Invalid price range: minimum {min} is greater than maximum {max}");
        }
        Ok(Self { min, max })
    }

    /// Lower bound.
    #[must_use]
    pub const fn min(&self) -> u32 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Whether `price` lies within the range (both ends included).
    #[must_use]
    pub const fn contains(&self, price: u32) -> bool {
        self.min <= price && price <= self.max
    }

    /// Returns a copy with a new minimum, clamped to the current maximum.
    #[must_use]
    pub fn with_min(self, min: u32) -> Self {
        Self {
            min: min.min(self.max),
            max: self.max,
        }
    }

    /// Returns a copy with a new maximum, clamped to the current minimum.
    #[must_use]
    pub fn with_max(self, max: u32) -> Self {
        Self {
            min: self.min,
            max: max.max(self.min),
        }
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: 0,
            max: DEFAULT_MAX_PRICE,
        }
    }
}

impl TryFrom<[u32; 2]> for PriceRange {
    type Error = anyhow::Error;

    fn try_from([min, max]: [u32; 2]) -> Result<Self> {
        Self::new(min, max)
    }
}

impl From<PriceRange> for [u32; 2] {
    fn from(range: PriceRange) -> Self {
        [range.min, range.max]
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}-${}", self.min, self.max)
    }
}

/// Stop-count filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StopsFilter {
    /// Any number of stops
    #[default]
    #[serde(rename = "all")]
    All,
    /// Non-stop only
    #[serde(rename = "0")]
    NonStop,
    /// Exactly one stop
    #[serde(rename = "1")]
    OneStop,
    /// Two stops or more
    #[serde(rename = "2+")]
    TwoOrMore,
}

impl StopsFilter {
    /// All options in selector order.
    pub const ALL: [Self; 4] = [Self::All, Self::NonStop, Self::OneStop, Self::TwoOrMore];

    /// Whether a flight with `stops` stops passes the filter.
    ///
    /// `TwoOrMore` is a lower bound, not an equality check.
    #[must_use]
    pub const fn matches(self, stops: u32) -> bool {
        match self {
            Self::All => true,
            Self::NonStop => stops == 0,
            Self::OneStop => stops == 1,
            Self::TwoOrMore => stops >= 2,
        }
    }

    /// Identifier used on the command line.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::NonStop => "0",
            Self::OneStop => "1",
            Self::TwoOrMore => "2+",
        }
    }

    /// Selector label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All Stops",
            Self::NonStop => "Non-stop",
            Self::OneStop => "1 Stop",
            Self::TwoOrMore => "2+ Stops",
        }
    }
}

impl FromStr for StopsFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "all" | "any" => Ok(Self::All),
            "0" | "nonstop" | "non-stop" => Ok(Self::NonStop),
            "1" => Ok(Self::OneStop),
            "2" | "2+" => Ok(Self::TwoOrMore),
            other => bail!("Invalid stops filter '{other}'. Must be all, 0, 1 or 2+"),
        }
    }
}

/// Departure time-of-day bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepartureTimeBucket {
    /// Any departure time
    #[default]
    All,
    /// 06:00 to 11:59
    Morning,
    /// 12:00 to 17:59
    Afternoon,
    /// 18:00 to 23:59
    Evening,
}

impl DepartureTimeBucket {
    /// All options in selector order.
    pub const ALL: [Self; 4] = [Self::All, Self::Morning, Self::Afternoon, Self::Evening];

    /// Whether a departure at `time` falls into this bucket.
    ///
    /// Departures between midnight and 05:59 only match `All`.
    #[must_use]
    pub fn matches(self, time: NaiveTime) -> bool {
        let hour = time.hour();
        match self {
            Self::All => true,
            Self::Morning => (6..12).contains(&hour),
            Self::Afternoon => (12..18).contains(&hour),
            Self::Evening => hour >= 18,
        }
    }

    /// Identifier used on the command line.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
        }
    }

    /// Selector label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "Any Time",
            Self::Morning => "Morning (6AM - 12PM)",
            Self::Afternoon => "Afternoon (12PM - 6PM)",
            Self::Evening => "Evening (6PM - 12AM)",
        }
    }
}

impl FromStr for DepartureTimeBucket {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|bucket| bucket.id().eq_ignore_ascii_case(s.trim()))
            .with_context(|| {
                format!("Invalid departure time '{s}'. Must be all, morning, afternoon or evening")
            })
    }
}

/// Result ordering key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Cheapest first
    #[default]
    Price,
    /// Shortest first
    Duration,
    /// Earliest departure first
    Departure,
    /// Earliest arrival first
    Arrival,
}

impl SortKey {
    /// All keys in selector order.
    pub const ALL: [Self; 4] = [Self::Price, Self::Duration, Self::Departure, Self::Arrival];

    /// Identifier used on the command line.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Duration => "duration",
            Self::Departure => "departure",
            Self::Arrival => "arrival",
        }
    }

    /// Selector label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Price => "Lowest Price",
            Self::Duration => "Shortest Duration",
            Self::Departure => "Earliest Departure",
            Self::Arrival => "Earliest Arrival",
        }
    }
}

impl FromStr for SortKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|key| key.id().eq_ignore_ascii_case(s.trim()))
            .with_context(|| {
                format!("Invalid sort key '{s}'. Must be price, duration, departure or arrival")
            })
    }
}

/// Replacement value for exactly one field of [`FilterPreferences`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterUpdate {
    /// New price range
    PriceRange(PriceRange),
    /// New stop-count filter
    Stops(StopsFilter),
    /// New departure bucket
    DepartureTime(DepartureTimeBucket),
    /// New sort key
    SortBy(SortKey),
    /// Show or hide the advanced filter panel
    AdvancedPanelVisible(bool),
}

/// Secondary refinement criteria and advanced panel visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterPreferences {
    /// Inclusive price bounds
    pub price_range: PriceRange,
    /// Stop-count filter
    pub stops: StopsFilter,
    /// Departure time-of-day bucket
    pub departure_time: DepartureTimeBucket,
    /// Result ordering
    pub sort_by: SortKey,
    /// Whether the advanced filter panel is shown
    #[serde(skip)]
    pub advanced_panel_visible: bool,
}

impl FilterPreferences {
    /// Creates filters with session defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces exactly one field, leaving the others untouched.
    pub fn update(&mut self, update: FilterUpdate) {
        match update {
            FilterUpdate::PriceRange(range) => self.price_range = range,
            FilterUpdate::Stops(stops) => self.stops = stops,
            FilterUpdate::DepartureTime(bucket) => self.departure_time = bucket,
            FilterUpdate::SortBy(key) => self.sort_by = key,
            FilterUpdate::AdvancedPanelVisible(visible) => self.advanced_panel_visible = visible,
        }
    }

    /// Flips the advanced panel visibility.
    pub fn toggle_advanced_panel(&mut self) {
        self.update(FilterUpdate::AdvancedPanelVisible(
            !self.advanced_panel_visible,
        ));
    }
}
