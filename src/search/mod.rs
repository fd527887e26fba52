//! Search execution and result derivation.
//!
//! - [`source`]: flight data providers
//! - [`lifecycle`]: background search with Idle/Searching state
//! - [`derivation`]: pure filtering and ordering of the displayed results

pub mod derivation;
pub mod lifecycle;
pub mod source;

pub use derivation::{derive_results, matches, sort_results};
pub use lifecycle::{SearchMessage, SearchState, SearchStatus};
pub use source::{builtin_flights, FlightSource, JsonFlightSource, MockFlightSource};
