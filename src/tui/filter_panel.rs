//! Advanced filter panel: price range, stops, departure time and sort order.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Theme;
use crate::models::FilterPreferences;

/// Filter panel widget
pub struct FilterPanel;

impl FilterPanel {
    /// Rows needed to draw the panel.
    pub const HEIGHT: u16 = 5;

    /// Render the panel with the current filter values.
    pub fn render(f: &mut Frame, area: Rect, filters: &FilterPreferences, theme: &Theme) {
        let block = Block::default()
            .title(" Advanced Filters ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.surface));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(inner);

        let range = filters.price_range;
        let cells = [
            (
                "Price Range",
                format!("${} - ${}", range.min(), range.max()),
                "[ ] min   - = max",
            ),
            ("Stops", filters.stops.label().to_string(), "s cycle"),
            (
                "Departure Time",
                filters.departure_time.label().to_string(),
                "t cycle",
            ),
            ("Sort By", filters.sort_by.label().to_string(), "o cycle"),
        ];

        for ((title, value, keys), column) in cells.into_iter().zip(columns.iter()) {
            let lines = vec![
                Line::from(Span::styled(title, Style::default().fg(theme.text_secondary))),
                Line::from(Span::styled(
                    value,
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(keys, Style::default().fg(theme.text_muted))),
            ];
            f.render_widget(Paragraph::new(lines), *column);
        }
    }

    /// One-line summary shown while the panel is hidden.
    ///
    /// `None` when every filter is at its default.
    #[must_use]
    pub fn summary(filters: &FilterPreferences) -> Option<String> {
        let defaults = FilterPreferences::new();
        let mut parts = Vec::new();

        if filters.price_range != defaults.price_range {
            parts.push(format!(
                "${}-${}",
                filters.price_range.min(),
                filters.price_range.max()
            ));
        }
        if filters.stops != defaults.stops {
            parts.push(filters.stops.label().to_string());
        }
        if filters.departure_time != defaults.departure_time {
            parts.push(filters.departure_time.label().to_string());
        }
        if filters.sort_by != defaults.sort_by {
            parts.push(format!("sorted by {}", filters.sort_by.label().to_lowercase()));
        }

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" · "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FilterUpdate, SortKey, StopsFilter};

    #[test]
    fn test_summary_defaults() {
        assert_eq!(FilterPanel::summary(&FilterPreferences::new()), None);
    }

    #[test]
    fn test_summary_lists_changes() {
        let mut filters = FilterPreferences::new();
        filters.update(FilterUpdate::Stops(StopsFilter::NonStop));
        filters.update(FilterUpdate::SortBy(SortKey::Duration));
        let summary = FilterPanel::summary(&filters).unwrap();
        assert!(summary.contains(StopsFilter::NonStop.label()));
        assert!(summary.contains("sorted by shortest duration"));
    }
}
