//! Status bar widget for status messages, the search indicator and key hints

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::filter_panel::FilterPanel;
use super::{AppState, Theme};
use crate::search::SearchStatus;
use crate::shortcuts::ShortcutRegistry;

/// Hints shown on the bottom line.
const MAX_HINTS: usize = 6;

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Rows needed to draw the status bar.
    pub const HEIGHT: u16 = 4;

    /// Render the status bar with contextual help
    pub fn render(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
        let first_line = if let Some(error) = &state.error_message {
            Line::from(vec![
                Span::styled("ERROR: ", Style::default().fg(theme.error).add_modifier(Modifier::BOLD)),
                Span::styled(error.clone(), Style::default().fg(theme.text)),
            ])
        } else {
            let status = state.search.status;
            let color = match status {
                SearchStatus::Idle => theme.inactive,
                SearchStatus::Searching => theme.warning,
            };
            let mut spans = vec![
                Span::styled("Search: ", Style::default().fg(theme.primary)),
                Span::styled(status.to_string(), Style::default().fg(color)),
            ];
            if !state.status_message.is_empty() {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(
                    state.status_message.clone(),
                    Style::default().fg(theme.text),
                ));
            }
            if !state.filters.advanced_panel_visible {
                if let Some(summary) = FilterPanel::summary(&state.filters) {
                    spans.push(Span::styled(
                        format!("  [{summary}]"),
                        Style::default().fg(theme.text_muted),
                    ));
                }
            }
            Line::from(spans)
        };

        let help_line = Self::get_contextual_help_line(state, theme);

        let status = Paragraph::new(vec![first_line, help_line])
            .style(Style::default().bg(theme.background))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Status ")
                    .style(Style::default().bg(theme.background)),
            );

        f.render_widget(status, area);
    }

    /// Key hints for the focused context.
    fn get_contextual_help_line(state: &AppState, theme: &Theme) -> Line<'static> {
        let registry = ShortcutRegistry::new();
        let hints = registry.help_rows(state.shortcut_context());

        let mut spans: Vec<Span<'static>> = Vec::new();
        spans.push(Span::styled("Help: ", Style::default().fg(theme.primary)));

        for (i, (keys, action)) in hints.into_iter().take(MAX_HINTS).enumerate() {
            if i > 0 {
                spans.push(Span::raw(" | "));
            }
            spans.push(Span::styled(keys, Style::default().fg(theme.accent)));
            spans.push(Span::raw(": "));
            spans.push(Span::raw(action.description()));
        }

        // '?' is text input while the form has focus
        if state.is_results_focused() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled("?", Style::default().fg(theme.accent)));
            spans.push(Span::raw(": Help"));
        }

        Line::from(spans)
    }
}
