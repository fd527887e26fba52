//! Help overlay listing every keyboard shortcut by focus context.
//!
//! Rows come from [`ShortcutRegistry::help_rows`], so the overlay always
//! matches the bindings that are actually dispatched.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

use super::component::Component;
use super::Theme;
use crate::shortcuts::{ShortcutRegistry, FORM_CONTEXT, RESULTS_CONTEXT};

/// Width of the key column.
const KEY_COLUMN: usize = 20;

/// Scrollable help overlay.
#[derive(Debug, Clone)]
pub struct HelpOverlay {
    /// Current scroll offset (line number)
    pub scroll_offset: usize,
    total_lines: usize,
    closed: bool,
}

impl HelpOverlay {
    /// Creates a new help overlay.
    #[must_use]
    pub fn new() -> Self {
        let total_lines = Self::help_content(&Theme::default()).len();
        Self {
            scroll_offset: 0,
            total_lines,
            closed: false,
        }
    }

    /// Scroll up by one line.
    pub const fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    /// Scroll down by one line.
    pub const fn scroll_down(&mut self) {
        if self.scroll_offset + 1 < self.total_lines {
            self.scroll_offset += 1;
        }
    }

    fn section(title: &str, theme: &Theme) -> Line<'static> {
        Line::from(Span::styled(
            format!("═══ {title} ═══"),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        ))
    }

    fn rows(registry: &ShortcutRegistry, context: &str, theme: &Theme) -> Vec<Line<'static>> {
        registry
            .help_rows(context)
            .into_iter()
            .map(|(keys, action)| {
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        format!("{keys:<KEY_COLUMN$}"),
                        Style::default().fg(theme.success),
                    ),
                    Span::styled(action.description(), Style::default().fg(theme.text)),
                ])
            })
            .collect()
    }

    fn help_content(theme: &Theme) -> Vec<Line<'static>> {
        let registry = ShortcutRegistry::new();

        let mut lines = vec![Self::section("RESULTS", theme), Line::from("")];
        lines.extend(Self::rows(&registry, RESULTS_CONTEXT, theme));
        lines.push(Line::from(""));

        lines.push(Self::section("SEARCH FORM", theme));
        lines.push(Line::from(""));
        lines.extend(Self::rows(&registry, FORM_CONTEXT, theme));
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                format!("{:<KEY_COLUMN$}", "→"),
                Style::default().fg(theme.success),
            ),
            Span::styled(
                "Accept suggestion / next cabin class",
                Style::default().fg(theme.text),
            ),
        ]));
        lines.push(Line::from(""));

        lines.push(Self::section("TIPS", theme));
        lines.push(Line::from(""));
        for tip in [
            "  • Dates use YYYY-MM-DD; leave Return empty for one-way",
            "  • Filters apply instantly to the last search results",
            "  • Dark mode is remembered between sessions",
        ] {
            lines.push(Line::from(Span::styled(tip, Style::default().fg(theme.text))));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press '?' or Esc to close • ↑↓ to scroll",
            Style::default().fg(theme.text_muted),
        )));

        lines
    }
}

impl Default for HelpOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for HelpOverlay {
    type Event = ();

    fn handle_input(&mut self, key: KeyEvent) -> Option<()> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(),
            KeyCode::Home => self.scroll_offset = 0,
            KeyCode::Esc | KeyCode::Char('?' | 'q') => {
                self.closed = true;
                return Some(());
            }
            _ => {}
        }
        None
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let width = (area.width * 60) / 100;
        let height = (area.height * 80) / 100;
        let modal_area = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };

        frame.render_widget(Clear, modal_area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(modal_area);

        let content = Self::help_content(theme);
        let visible_height = chunks[0].height.saturating_sub(2) as usize;

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .title(" Help - Keyboard Shortcuts ")
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.primary)),
            )
            .style(Style::default().fg(theme.text).bg(theme.background))
            .scroll((self.scroll_offset as u16, 0));
        frame.render_widget(paragraph, chunks[0]);

        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"))
            .style(Style::default().fg(theme.primary));
        let mut scrollbar_state =
            ScrollbarState::new(self.total_lines.saturating_sub(visible_height))
                .position(self.scroll_offset);
        frame.render_stateful_widget(scrollbar, chunks[1], &mut scrollbar_state);
    }

    fn should_close(&self) -> bool {
        self.closed
    }
}
