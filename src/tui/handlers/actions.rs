//! Action dispatch for the main UI.

use anyhow::Result;
use tracing::debug;

use crate::models::filters::{DEFAULT_MAX_PRICE, PRICE_STEP};
use crate::models::{DepartureTimeBucket, FilterPreferences, FilterUpdate, SortKey, StopsFilter};
use crate::shortcuts::Action;
use crate::tui::{AppState, HelpOverlay};

/// Value after `current` in `all`, wrapping around.
fn cycle<T: Copy + PartialEq>(all: &[T], current: T) -> T {
    let index = all.iter().position(|v| *v == current).unwrap_or(0);
    all[(index + 1) % all.len()]
}

fn handle_submit(state: &mut AppState) {
    match state.search.submit(&state.criteria) {
        Ok(generation) => {
            debug!("Submitted search #{generation} from the TUI");
            state.focus_results();
            state.scroll = 0;
            state.set_status(format!(
                "Searching {} → {}...",
                state.criteria.departure, state.criteria.destination
            ));
        }
        Err(e) => state.set_error(e.to_string()),
    }
}

fn handle_price(state: &mut AppState, action: Action) {
    let range = state.filters.price_range;
    let ceiling = DEFAULT_MAX_PRICE.max(range.max());
    let range = match action {
        Action::RaiseMinPrice => range.with_min(range.min().saturating_add(PRICE_STEP)),
        Action::LowerMinPrice => range.with_min(range.min().saturating_sub(PRICE_STEP)),
        Action::RaiseMaxPrice => range.with_max((range.max() + PRICE_STEP).min(ceiling)),
        Action::LowerMaxPrice => range.with_max(range.max().saturating_sub(PRICE_STEP)),
        _ => return,
    };
    state.apply_filter(FilterUpdate::PriceRange(range));
    state.set_status(format!("Price range {range}"));
}

fn handle_toggle_theme(state: &mut AppState) {
    match state.theme_preference.toggle() {
        Ok(dark) => state.set_status(if dark {
            "Dark mode on"
        } else {
            "Dark mode off"
        }),
        Err(e) => state.set_error(format!("{e:#}")),
    }
}

fn handle_cancel(state: &mut AppState) {
    if state.search.is_searching() {
        state.search.cancel();
        state.set_status("Search cancelled");
    } else {
        state.set_status("");
    }
}

/// Dispatch action to appropriate handler
pub fn dispatch_action(state: &mut AppState, action: Action) -> Result<bool> {
    debug!("Action {}", action.id());

    match action {
        // Focus
        Action::FocusForm => state.focus_form(),
        Action::FocusResults => state.focus_results(),
        Action::NextField => state.form.next_field(),
        Action::PreviousField => state.form.previous_field(),

        // Search
        Action::Submit => handle_submit(state),

        // Results
        Action::ScrollUp => state.scroll = state.scroll.saturating_sub(1),
        Action::ScrollDown => {
            state.scroll = (state.scroll + 1).min(state.results.len().saturating_sub(1));
        }

        // Filters
        Action::ToggleAdvancedFilters => state.filters.toggle_advanced_panel(),
        Action::CycleStops => {
            let stops = cycle(&StopsFilter::ALL, state.filters.stops);
            state.apply_filter(FilterUpdate::Stops(stops));
            state.set_status(format!("Stops: {}", stops.label()));
        }
        Action::CycleDepartureTime => {
            let bucket = cycle(&DepartureTimeBucket::ALL, state.filters.departure_time);
            state.apply_filter(FilterUpdate::DepartureTime(bucket));
            state.set_status(format!("Departure: {}", bucket.label()));
        }
        Action::CycleSort => {
            let key = cycle(&SortKey::ALL, state.filters.sort_by);
            state.apply_filter(FilterUpdate::SortBy(key));
            state.set_status(format!("Sort: {}", key.label()));
        }
        Action::RaiseMinPrice
        | Action::LowerMinPrice
        | Action::RaiseMaxPrice
        | Action::LowerMaxPrice => handle_price(state, action),
        Action::ResetFilters => {
            state.filters = FilterPreferences {
                advanced_panel_visible: state.filters.advanced_panel_visible,
                ..FilterPreferences::new()
            };
            state.refresh_results();
            state.set_status("Filters reset");
        }

        // View & theme
        Action::SetGridView => {
            state.view.set_grid();
            state.scroll = 0;
        }
        Action::SetListView => {
            state.view.set_list();
            state.scroll = 0;
        }
        Action::ToggleTheme => handle_toggle_theme(state),

        // General
        Action::ToggleHelp => state.help = Some(HelpOverlay::new()),
        Action::Quit => {
            state.should_quit = true;
            return Ok(true);
        }
        Action::Cancel => handle_cancel(state),
    }

    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(cycle(&StopsFilter::ALL, StopsFilter::All), StopsFilter::NonStop);
        assert_eq!(cycle(&StopsFilter::ALL, StopsFilter::TwoOrMore), StopsFilter::All);
        assert_eq!(cycle(&SortKey::ALL, SortKey::Arrival), SortKey::Price);
    }
}
