//! Derivation of the displayed result set from source records, criteria and filters.

use crate::models::{FilterPreferences, FlightRecord, SearchCriteria, SortKey};

/// Whether a record passes the criteria and every filter predicate.
///
/// Predicates run in order: cabin class, price range, stops, departure bucket.
#[must_use]
pub fn matches(record: &FlightRecord, criteria: &SearchCriteria, filters: &FilterPreferences) -> bool {
    record.cabin_class == criteria.cabin_class
        && filters.price_range.contains(record.price)
        && filters.stops.matches(record.stops)
        && filters.departure_time.matches(record.departure_time)
}

/// Produces the flights to render.
///
/// Pure and uncached: callers re-run it whenever any input changes. Records
/// are ordered by `filters.sort_by`; ties keep the source order.
#[must_use]
pub fn derive_results(
    flights: &[FlightRecord],
    criteria: &SearchCriteria,
    filters: &FilterPreferences,
) -> Vec<FlightRecord> {
    let mut results: Vec<FlightRecord> = flights
        .iter()
        .filter(|record| matches(record, criteria, filters))
        .cloned()
        .collect();

    sort_results(&mut results, filters.sort_by);
    results
}

/// Stable sort by the given key.
pub fn sort_results(results: &mut [FlightRecord], key: SortKey) {
    match key {
        SortKey::Price => results.sort_by_key(|record| record.price),
        SortKey::Duration => results.sort_by_key(|record| record.duration),
        SortKey::Departure => results.sort_by_key(|record| record.departure_time),
        SortKey::Arrival => results.sort_by_key(FlightRecord::arrival_offset_minutes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CabinClass, DepartureTimeBucket, FilterUpdate, FlightDuration, PriceRange, StopsFilter,
    };
    use chrono::NaiveTime;

    fn flight(id: u32, cabin: CabinClass, price: u32, stops: u32, dep_hour: u32) -> FlightRecord {
        FlightRecord {
            id,
            airline: format!("Airline {id}"),
            departure_time: NaiveTime::from_hms_opt(dep_hour, 0, 0).unwrap(),
            arrival_time: NaiveTime::from_hms_opt((dep_hour + 3) % 24, 0, 0).unwrap(),
            duration: FlightDuration::from_hm(3, 0),
            price,
            stops,
            cabin_class: cabin,
            airline_logo_ref: String::new(),
        }
    }

    fn source() -> Vec<FlightRecord> {
        vec![
            flight(1, CabinClass::Economy, 450, 0, 8),
            flight(2, CabinClass::Business, 380, 1, 10),
        ]
    }

    fn ids(results: &[FlightRecord]) -> Vec<u32> {
        results.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_economy_default_filters_yields_first_record() {
        let results = derive_results(&source(), &SearchCriteria::new(), &FilterPreferences::new());
        assert_eq!(ids(&results), vec![1]);
    }

    #[test]
    fn test_price_ceiling_excludes_expensive_record() {
        let mut filters = FilterPreferences::new();
        filters.update(FilterUpdate::PriceRange(PriceRange::new(0, 400).unwrap()));

        let results = derive_results(&source(), &SearchCriteria::new(), &filters);
        assert!(results.is_empty());
    }

    #[test]
    fn test_price_bounds_are_inclusive() {
        let mut filters = FilterPreferences::new();
        filters.update(FilterUpdate::PriceRange(PriceRange::new(450, 450).unwrap()));

        let results = derive_results(&source(), &SearchCriteria::new(), &filters);
        assert_eq!(ids(&results), vec![1]);
    }

    #[test]
    fn test_only_matching_cabin_class() {
        let mut criteria = SearchCriteria::new();
        criteria.cabin_class = CabinClass::Business;

        let results = derive_results(&source(), &criteria, &FilterPreferences::new());
        assert!(results.iter().all(|r| r.cabin_class == CabinClass::Business));
        assert_eq!(ids(&results), vec![2]);
    }

    #[test]
    fn test_two_or_more_stops() {
        let flights = vec![
            flight(1, CabinClass::Economy, 100, 1, 8),
            flight(2, CabinClass::Economy, 100, 2, 8),
            flight(3, CabinClass::Economy, 100, 3, 8),
        ];
        let mut filters = FilterPreferences::new();
        filters.update(FilterUpdate::Stops(StopsFilter::TwoOrMore));

        let results = derive_results(&flights, &SearchCriteria::new(), &filters);
        assert_eq!(ids(&results), vec![2, 3]);
    }

    #[test]
    fn test_all_stops_excludes_nothing() {
        let flights: Vec<_> = (0..5)
            .map(|stops| flight(stops + 1, CabinClass::Economy, 100, stops, 8))
            .collect();

        let results = derive_results(&flights, &SearchCriteria::new(), &FilterPreferences::new());
        assert_eq!(results.len(), flights.len());
    }

    #[test]
    fn test_departure_bucket() {
        let flights = vec![
            flight(1, CabinClass::Economy, 100, 0, 7),
            flight(2, CabinClass::Economy, 100, 0, 13),
            flight(3, CabinClass::Economy, 100, 0, 19),
            flight(4, CabinClass::Economy, 100, 0, 17),
            flight(5, CabinClass::Economy, 100, 0, 3),
        ];
        let mut filters = FilterPreferences::new();
        filters.update(FilterUpdate::DepartureTime(DepartureTimeBucket::Afternoon));

        let results = derive_results(&flights, &SearchCriteria::new(), &filters);
        assert_eq!(ids(&results), vec![2, 4]);

        filters.update(FilterUpdate::DepartureTime(DepartureTimeBucket::Evening));
        let results = derive_results(&flights, &SearchCriteria::new(), &filters);
        assert_eq!(ids(&results), vec![3]);
    }

    #[test]
    fn test_sort_is_stable() {
        let flights = vec![
            flight(1, CabinClass::Economy, 300, 0, 9),
            flight(2, CabinClass::Economy, 200, 0, 7),
            flight(3, CabinClass::Economy, 300, 0, 6),
        ];

        let results = derive_results(&flights, &SearchCriteria::new(), &FilterPreferences::new());
        assert_eq!(ids(&results), vec![2, 1, 3]);

        let mut filters = FilterPreferences::new();
        filters.update(FilterUpdate::SortBy(SortKey::Departure));
        let results = derive_results(&flights, &SearchCriteria::new(), &filters);
        assert_eq!(ids(&results), vec![3, 2, 1]);
    }

    #[test]
    fn test_sort_by_arrival_accounts_for_overnight() {
        let mut red_eye = flight(1, CabinClass::Economy, 100, 0, 23);
        red_eye.duration = FlightDuration::from_hm(6, 0);
        let morning = flight(2, CabinClass::Economy, 100, 0, 8);

        let mut filters = FilterPreferences::new();
        filters.update(FilterUpdate::SortBy(SortKey::Arrival));

        let results = derive_results(&[red_eye, morning], &SearchCriteria::new(), &filters);
        assert_eq!(ids(&results), vec![2, 1]);
    }

    #[test]
    fn test_empty_source() {
        let results = derive_results(&[], &SearchCriteria::new(), &FilterPreferences::new());
        assert!(results.is_empty());
    }
}
