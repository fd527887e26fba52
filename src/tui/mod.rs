//! Terminal user interface components and state management.
//!
//! This module contains the main TUI loop, `AppState`, event handling,
//! and all UI widgets using Ratatui.

// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]

pub mod component;
pub mod filter_panel;
pub mod handlers;
pub mod help_overlay;
pub mod results;
pub mod search_form;
pub mod status_bar;
pub mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::Config;
use crate::models::{CriteriaUpdate, FilterPreferences, FilterUpdate, FlightRecord, SearchCriteria};
use crate::preferences::{FileStorage, ThemePreference, ViewMode, ViewPreference};
use crate::search::{derive_results, FlightSource, SearchState};
use crate::shortcuts::{FORM_CONTEXT, RESULTS_CONTEXT};

// Re-export TUI components
pub use component::Component;
pub use filter_panel::FilterPanel;
pub use help_overlay::HelpOverlay;
pub use results::ResultsView;
pub use search_form::SearchForm;
pub use status_bar::StatusBar;
pub use theme::Theme;

/// Which part of the screen receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The search form; printable keys are text input
    Form,
    /// The result list; printable keys are shortcuts
    Results,
}

/// Application state - single source of truth
///
/// All UI components read from this state immutably.
/// Only event handlers modify state explicitly.
pub struct AppState {
    // Core data
    /// Loaded configuration
    pub config: Config,
    /// Primary search input
    pub criteria: SearchCriteria,
    /// Secondary refinement
    pub filters: FilterPreferences,
    /// Background search and the last returned flights
    pub search: SearchState,
    /// Derived result set shown in the list
    pub results: Vec<FlightRecord>,

    // Preferences
    /// Grid/list mode for this session
    pub view: ViewPreference,
    /// Persisted dark-mode preference
    pub theme_preference: ThemePreference<FileStorage>,

    // UI state
    /// Current UI theme, derived from the root style every frame
    pub theme: Theme,
    /// Search form component
    pub form: SearchForm,
    /// Focused area
    pub focus: Focus,
    /// First visible result row
    pub scroll: usize,
    /// Help overlay, when open
    pub help: Option<HelpOverlay>,
    /// Status bar message
    pub status_message: String,
    /// Current error message (if any)
    pub error_message: Option<String>,
    /// Frame counter for the searching spinner
    pub tick: usize,
    /// Whether the main loop should exit
    pub should_quit: bool,
}

impl AppState {
    /// Creates the state over an explicit source and preference storage.
    pub fn new(
        config: Config,
        source: Arc<dyn FlightSource>,
        theme_preference: ThemePreference<FileStorage>,
    ) -> Self {
        let mut criteria = SearchCriteria::new();
        criteria.update(CriteriaUpdate::Passengers(config.search.default_passengers));
        criteria.update(CriteriaUpdate::CabinClass(config.search.default_cabin_class));

        let search = SearchState::new(source, config.search.latency());
        let help = config.ui.show_help_on_startup.then(HelpOverlay::new);
        let theme = Theme::from_root(theme_preference.root_style());

        let mut state = Self {
            form: SearchForm::new(&criteria),
            criteria,
            filters: FilterPreferences::new(),
            search,
            results: Vec::new(),
            view: ViewPreference::new(),
            theme_preference,
            theme,
            focus: Focus::Form,
            scroll: 0,
            help,
            status_message: String::new(),
            error_message: None,
            tick: 0,
            should_quit: false,
            config,
        };
        state.refresh_results();
        state
    }

    /// Creates the state from the configuration and the preference file.
    pub fn from_config(config: Config) -> Result<Self> {
        let storage = FileStorage::in_config_dir()?;
        let theme_preference = ThemePreference::load(storage);
        let source = config.flight_source(None);
        info!("Using flight source {}", source.describe());
        Ok(Self::new(config, source, theme_preference))
    }

    /// Recomputes the displayed results from the last search and current inputs.
    pub fn refresh_results(&mut self) {
        self.results = derive_results(&self.search.flights, &self.criteria, &self.filters);
    }

    /// Applies one criteria field update.
    pub fn apply_criteria(&mut self, update: CriteriaUpdate) {
        self.criteria.update(update);
        self.refresh_results();
    }

    /// Applies one filter update.
    pub fn apply_filter(&mut self, update: FilterUpdate) {
        self.filters.update(update);
        self.refresh_results();
    }

    /// Polls the background search. Returns true when it finished this tick.
    pub fn poll_search(&mut self) -> bool {
        if !self.search.poll() {
            return false;
        }
        if let Some(error) = self.search.last_error.clone() {
            self.set_error(format!("Search failed: {error}"));
        } else {
            self.refresh_results();
            self.scroll = 0;
            self.set_status(format!("{} flights found", self.results.len()));
        }
        true
    }

    /// Whether the result list has focus.
    #[must_use]
    pub fn is_results_focused(&self) -> bool {
        self.focus == Focus::Results
    }

    /// Shortcut context for the focused area.
    #[must_use]
    pub fn shortcut_context(&self) -> &'static str {
        match self.focus {
            Focus::Form => FORM_CONTEXT,
            Focus::Results => RESULTS_CONTEXT,
        }
    }

    /// Moves focus to the search form.
    pub fn focus_form(&mut self) {
        self.focus = Focus::Form;
        self.form.focused = true;
    }

    /// Moves focus to the result list.
    pub fn focus_results(&mut self) {
        self.focus = Focus::Results;
        self.form.focused = false;
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.error_message = None;
    }

    /// Set error message
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error_message = Some(error.into());
    }

    /// Clear error message
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Releases the presentation surface: clears the root style and
    /// cancels any in-flight search. The stored theme is kept.
    pub fn shutdown(&mut self) {
        self.theme_preference.teardown();
        self.search.cancel();
    }
}

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui(
    state: &mut AppState,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        // Palette follows the root style so a toggle shows on the next frame
        state.theme = Theme::from_root(state.theme_preference.root_style());
        state.tick = state.tick.wrapping_add(1);

        terminal.draw(|f| render(f, state))?;

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key_event(state, key)? {
                    break; // User quit
                }
            }
        }

        state.poll_search();

        if state.should_quit {
            break;
        }
    }

    state.shutdown();
    Ok(())
}

/// Render the UI from current state
fn render(f: &mut Frame, state: &AppState) {
    // Fill entire screen with theme background color first
    let full_bg = Block::default().style(Style::default().bg(state.theme.background));
    f.render_widget(full_bg, f.area());

    let filter_height = if state.filters.advanced_panel_visible {
        FilterPanel::HEIGHT
    } else {
        0
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Title bar
            Constraint::Length(8),             // Search form
            Constraint::Length(filter_height), // Advanced filters
            Constraint::Min(5),                // Results
            Constraint::Length(StatusBar::HEIGHT),
        ])
        .split(f.area());

    render_title_bar(f, chunks[0], state);
    ResultsView::render(f, chunks[3], state);
    if state.filters.advanced_panel_visible {
        FilterPanel::render(f, chunks[2], &state.filters, &state.theme);
    }
    StatusBar::render(f, chunks[4], state, &state.theme);
    // Form last so its suggestion list draws over the panels below it
    state.form.render(f, chunks[1], &state.theme);

    if let Some(help) = &state.help {
        help.render(f, f.area(), &state.theme);
    }
}

/// View, theme and flight source indicators shown after the app name.
fn title_details(state: &AppState) -> String {
    let view = match state.view.mode() {
        ViewMode::Grid => "Grid",
        ViewMode::List => "List",
    };
    let mode = if state.theme_preference.is_dark() {
        "Dark"
    } else {
        "Light"
    };
    format!(
        " View: {view}  Theme: {mode}  Source: {}",
        state.search.source_description()
    )
}

/// Render title bar with view and theme indicators
fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = &state.theme;

    let title = Line::from(vec![
        Span::styled(
            " ✈ FlightFinder ",
            Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
        ),
        Span::styled(title_details(state), Style::default().fg(theme.text_secondary)),
    ]);

    let title_widget = Paragraph::new(title)
        .style(Style::default().bg(theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .style(Style::default().bg(theme.background)),
        );

    f.render_widget(title_widget, area);
}

/// Handle keyboard input events
fn handle_key_event(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    use crossterm::event::KeyCode;

    // If an error is shown, Enter or Esc dismisses it
    if state.error_message.is_some() && matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
        state.clear_error();
        return Ok(false);
    }

    // Route to popup handler if popup is active
    if state.help.is_some() {
        return handlers::handle_popup_input(state, key);
    }

    // Main UI key handling
    handlers::handle_main_input(state, key)
}
