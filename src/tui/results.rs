//! Result list rendered as grid cards or list rows.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use super::{AppState, Theme};
use crate::models::flight::clock;
use crate::models::FlightRecord;
use crate::preferences::ViewMode;

/// Rows taken by one grid card including its border.
const CARD_HEIGHT: u16 = 7;
/// Narrowest card before the grid drops a column.
const MIN_CARD_WIDTH: u16 = 34;
/// Most grid columns.
const MAX_COLUMNS: u16 = 3;

const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];

/// Result list widget
pub struct ResultsView;

impl ResultsView {
    /// Render the results area for the current state.
    pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let title = match state.view.mode() {
            ViewMode::Grid => format!(" Flights ({}) · Grid ", state.results.len()),
            ViewMode::List => format!(" Flights ({}) · List ", state.results.len()),
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if state.is_results_focused() {
                theme.primary
            } else {
                theme.inactive
            }));
        let inner = block.inner(area);
        f.render_widget(block, area);

        if state.search.is_searching() {
            let frame = SPINNER[state.tick % SPINNER.len()];
            Self::render_message(f, inner, &format!("{frame} Searching flights..."), theme.warning);
            return;
        }

        if state.results.is_empty() {
            Self::render_message(
                f,
                inner,
                "No flights match your search. Try adjusting the filters.",
                theme.text_muted,
            );
            return;
        }

        match state.view.mode() {
            ViewMode::Grid => Self::render_grid(f, inner, state),
            ViewMode::List => Self::render_list(f, inner, state),
        }
    }

    fn render_message(f: &mut Frame, area: Rect, message: &str, color: ratatui::style::Color) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(45),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);
        f.render_widget(
            Paragraph::new(message)
                .alignment(Alignment::Center)
                .style(Style::default().fg(color)),
            rows[1],
        );
    }

    /// Number of grid columns that fit in `width`.
    #[must_use]
    pub fn grid_columns(width: u16) -> u16 {
        (width / MIN_CARD_WIDTH).clamp(1, MAX_COLUMNS)
    }

    fn render_grid(f: &mut Frame, area: Rect, state: &AppState) {
        let columns = Self::grid_columns(area.width);
        let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
        let first_row = state.scroll.min(Self::max_scroll(state, area.width));

        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
            .split(area);

        let chunks = state
            .results
            .chunks(columns as usize)
            .skip(first_row)
            .take(visible_rows);

        for (cards, row_area) in chunks.zip(row_areas.iter()) {
            let cell_areas = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, u32::from(columns)); columns as usize])
                .split(*row_area);
            for (flight, cell) in cards.iter().zip(cell_areas.iter()) {
                Self::render_card(f, *cell, flight, state, &state.theme);
            }
        }
    }

    fn render_card(f: &mut Frame, area: Rect, flight: &FlightRecord, state: &AppState, theme: &Theme) {
        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", flight.airline),
                Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Line::from(Span::styled(
                format!(" ${} ", flight.price),
                Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
            )))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.inactive))
            .style(Style::default().bg(theme.surface));

        let lines = vec![
            Line::from(vec![
                Span::styled(
                    clock::format(&flight.departure_time),
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                ),
                Span::styled("  →  ", Style::default().fg(theme.text_muted)),
                Span::styled(
                    arrival_text(flight),
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(
                format!("{} → {}", state.criteria.departure, state.criteria.destination),
                Style::default().fg(theme.text_secondary),
            )),
            Line::from(vec![
                Span::styled(flight.duration.to_string(), Style::default().fg(theme.text)),
                Span::styled(" · ", Style::default().fg(theme.text_muted)),
                Span::styled(flight.stops_label(), Style::default().fg(theme.text)),
                Span::styled(" · ", Style::default().fg(theme.text_muted)),
                Span::styled(flight.cabin_class.label(), Style::default().fg(theme.text)),
            ]),
            Line::from(Span::styled(
                logo_host(flight),
                Style::default().fg(theme.text_muted),
            )),
        ];

        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_list(f: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let header = Row::new(["Airline", "Depart", "Arrive", "Duration", "Stops", "Cabin", "Price"])
            .style(
                Style::default()
                    .fg(theme.text_secondary)
                    .add_modifier(Modifier::BOLD),
            );

        let rows: Vec<Row> = state
            .results
            .iter()
            .skip(state.scroll.min(Self::max_scroll(state, area.width)))
            .map(|flight| {
                Row::new(vec![
                    Cell::from(flight.airline.clone())
                        .style(Style::default().fg(theme.primary)),
                    Cell::from(clock::format(&flight.departure_time)),
                    Cell::from(arrival_text(flight)),
                    Cell::from(flight.duration.to_string()),
                    Cell::from(flight.stops_label()),
                    Cell::from(flight.cabin_class.label()),
                    Cell::from(format!("${}", flight.price)).style(
                        Style::default()
                            .fg(theme.success)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
                .style(Style::default().fg(theme.text))
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Min(16),
                Constraint::Length(9),
                Constraint::Length(12),
                Constraint::Length(9),
                Constraint::Length(9),
                Constraint::Length(16),
                Constraint::Length(7),
            ],
        )
        .header(header)
        .column_spacing(2);

        f.render_widget(table, area);
    }

    /// Highest useful scroll position for the current view.
    #[must_use]
    pub fn max_scroll(state: &AppState, width: u16) -> usize {
        match state.view.mode() {
            ViewMode::Grid => {
                let columns = Self::grid_columns(width) as usize;
                state.results.len().div_ceil(columns).saturating_sub(1)
            }
            ViewMode::List => state.results.len().saturating_sub(1),
        }
    }
}

/// Arrival time, marked `+N` when it falls on a later day.
fn arrival_text(flight: &FlightRecord) -> String {
    let days = flight.arrival_offset_minutes() / (24 * 60);
    let time = clock::format(&flight.arrival_time);
    if days > 0 {
        format!("{time} +{days}")
    } else {
        time
    }
}

/// Host part of the logo URL, shown in place of the image.
fn logo_host(flight: &FlightRecord) -> String {
    let url = flight.logo_url();
    url.trim_start_matches("https://")
        .split('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FlightDuration;
    use crate::search::builtin_flights;
    use chrono::NaiveTime;

    #[test]
    fn test_grid_columns() {
        assert_eq!(ResultsView::grid_columns(10), 1);
        assert_eq!(ResultsView::grid_columns(70), 2);
        assert_eq!(ResultsView::grid_columns(400), 3);
    }

    #[test]
    fn test_arrival_text_overnight() {
        let mut flight = builtin_flights().remove(0);
        assert_eq!(arrival_text(&flight), "11:30 AM");

        flight.departure_time = NaiveTime::from_hms_opt(22, 0, 0).unwrap();
        flight.arrival_time = NaiveTime::from_hms_opt(1, 30, 0).unwrap();
        flight.duration = FlightDuration::from_hm(3, 30);
        assert_eq!(arrival_text(&flight), "01:30 AM +1");
    }

    #[test]
    fn test_logo_host_fallback() {
        let mut flight = builtin_flights().remove(0);
        flight.airline_logo_ref = String::new();
        assert_eq!(logo_host(&flight), "images.unsplash.com");
    }
}
