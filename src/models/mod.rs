//! Data models for search criteria, filters and flight records.
//!
//! This module contains the core data structures used throughout the application.
//! Models are designed to be independent of UI and business logic.

pub mod criteria;
pub mod filters;
pub mod flight;

// Re-export all model types
pub use criteria::{
    suggest_locations, CabinClass, CriteriaField, CriteriaUpdate, SearchCriteria, KNOWN_LOCATIONS,
};
pub use filters::{
    DepartureTimeBucket, FilterPreferences, FilterUpdate, PriceRange, SortKey, StopsFilter,
};
pub use flight::{FlightDuration, FlightRecord, FALLBACK_LOGO_REF};
