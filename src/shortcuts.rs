//! Centralized shortcut and action system.
//!
//! Keyboard shortcuts for both focus contexts live here, and the help overlay
//! reads its rows from the same table so the two cannot drift apart.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Context used while the result list has focus.
pub const RESULTS_CONTEXT: &str = "results";
/// Context used while a search form field has focus.
pub const FORM_CONTEXT: &str = "form";

/// All possible actions in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // === FOCUS ===
    /// Move focus to the search form
    FocusForm,
    /// Move focus to the result list
    FocusResults,
    /// Next form field
    NextField,
    /// Previous form field
    PreviousField,

    // === SEARCH ===
    /// Validate the criteria and start a search
    Submit,

    // === RESULTS ===
    /// Scroll the result list up
    ScrollUp,
    /// Scroll the result list down
    ScrollDown,

    // === FILTERS ===
    /// Show or hide the advanced filter panel
    ToggleAdvancedFilters,
    /// Step through the stops filter
    CycleStops,
    /// Step through the departure time buckets
    CycleDepartureTime,
    /// Step through the sort keys
    CycleSort,
    /// Raise the lower price bound
    RaiseMinPrice,
    /// Lower the lower price bound
    LowerMinPrice,
    /// Raise the upper price bound
    RaiseMaxPrice,
    /// Lower the upper price bound
    LowerMaxPrice,
    /// Restore default filters
    ResetFilters,

    // === VIEW & THEME ===
    /// Show results as grid cards
    SetGridView,
    /// Show results as list rows
    SetListView,
    /// Switch between light and dark
    ToggleTheme,

    // === GENERAL ===
    /// Show or hide the help overlay
    ToggleHelp,
    /// Exit the application
    Quit,
    /// Cancel the in-flight search
    Cancel,
}

impl Action {
    /// Stable identifier, used in logs.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::FocusForm => "focus_form",
            Self::FocusResults => "focus_results",
            Self::NextField => "next_field",
            Self::PreviousField => "previous_field",
            Self::Submit => "submit",
            Self::ScrollUp => "scroll_up",
            Self::ScrollDown => "scroll_down",
            Self::ToggleAdvancedFilters => "toggle_advanced_filters",
            Self::CycleStops => "cycle_stops",
            Self::CycleDepartureTime => "cycle_departure_time",
            Self::CycleSort => "cycle_sort",
            Self::RaiseMinPrice => "raise_min_price",
            Self::LowerMinPrice => "lower_min_price",
            Self::RaiseMaxPrice => "raise_max_price",
            Self::LowerMaxPrice => "lower_max_price",
            Self::ResetFilters => "reset_filters",
            Self::SetGridView => "set_grid_view",
            Self::SetListView => "set_list_view",
            Self::ToggleTheme => "toggle_theme",
            Self::ToggleHelp => "toggle_help",
            Self::Quit => "quit",
            Self::Cancel => "cancel",
        }
    }

    /// Short description shown in the help overlay.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::FocusForm => "Edit search",
            Self::FocusResults => "Back to results",
            Self::NextField => "Next field",
            Self::PreviousField => "Previous field",
            Self::Submit => "Search flights",
            Self::ScrollUp => "Scroll up",
            Self::ScrollDown => "Scroll down",
            Self::ToggleAdvancedFilters => "Advanced filters",
            Self::CycleStops => "Cycle stops",
            Self::CycleDepartureTime => "Cycle departure time",
            Self::CycleSort => "Cycle sort order",
            Self::RaiseMinPrice => "Min price +50",
            Self::LowerMinPrice => "Min price -50",
            Self::RaiseMaxPrice => "Max price +50",
            Self::LowerMaxPrice => "Max price -50",
            Self::ResetFilters => "Reset filters",
            Self::SetGridView => "Grid view",
            Self::SetListView => "List view",
            Self::ToggleTheme => "Toggle dark mode",
            Self::ToggleHelp => "Toggle help",
            Self::Quit => "Quit",
            Self::Cancel => "Cancel search",
        }
    }
}

/// A key binding (key + modifiers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    /// Key code
    pub code: KeyCode,
    /// Required modifiers
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Create a new key binding.
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Create a key binding from a KeyEvent.
    #[must_use]
    pub const fn from_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }

    /// Human-readable key name, e.g. `Ctrl+g`.
    #[must_use]
    pub fn display(&self) -> String {
        let key = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "Shift+Tab".to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            other => format!("{other:?}"),
        };

        if self.modifiers.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{key}")
        } else if self.modifiers.contains(KeyModifiers::ALT) {
            format!("Alt+{key}")
        } else {
            key
        }
    }
}

/// Shortcut registry that maps key events to actions for a given context.
pub struct ShortcutRegistry {
    /// Maps (context, key_binding) to Action
    bindings: HashMap<(String, KeyBinding), Action>,
    /// Registration order per context, for the help overlay
    order: Vec<(String, KeyBinding, Action)>,
}

impl ShortcutRegistry {
    /// Create a new shortcut registry with default bindings.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            bindings: HashMap::new(),
            order: Vec::new(),
        };

        registry.register_results_shortcuts();
        registry.register_form_shortcuts();
        registry
    }

    /// Shortcuts while the result list has focus. Plain letters are free here.
    fn register_results_shortcuts(&mut self) {
        use KeyCode as K;
        use KeyModifiers as M;

        let ctx = RESULTS_CONTEXT;

        // === FOCUS & SEARCH ===
        self.register(ctx, K::Char('/'), M::NONE, Action::FocusForm);
        self.register(ctx, K::Tab, M::NONE, Action::FocusForm);
        self.register(ctx, K::Enter, M::NONE, Action::Submit);

        // === RESULTS ===
        self.register(ctx, K::Up, M::NONE, Action::ScrollUp);
        self.register(ctx, K::Down, M::NONE, Action::ScrollDown);
        self.register(ctx, K::Char('k'), M::NONE, Action::ScrollUp);
        self.register(ctx, K::Char('j'), M::NONE, Action::ScrollDown);

        // === FILTERS ===
        self.register(ctx, K::Char('f'), M::NONE, Action::ToggleAdvancedFilters);
        self.register(ctx, K::Char('s'), M::NONE, Action::CycleStops);
        self.register(ctx, K::Char('t'), M::NONE, Action::CycleDepartureTime);
        self.register(ctx, K::Char('o'), M::NONE, Action::CycleSort);
        self.register(ctx, K::Char(']'), M::NONE, Action::RaiseMinPrice);
        self.register(ctx, K::Char('['), M::NONE, Action::LowerMinPrice);
        self.register(ctx, K::Char('='), M::NONE, Action::RaiseMaxPrice);
        self.register(ctx, K::Char('-'), M::NONE, Action::LowerMaxPrice);
        self.register(ctx, K::Char('r'), M::NONE, Action::ResetFilters);

        // === VIEW & THEME ===
        self.register(ctx, K::Char('g'), M::NONE, Action::SetGridView);
        self.register(ctx, K::Char('l'), M::NONE, Action::SetListView);
        self.register(ctx, K::Char('d'), M::NONE, Action::ToggleTheme);

        // === GENERAL ===
        self.register(ctx, K::Char('?'), M::NONE, Action::ToggleHelp);
        self.register(ctx, K::Char('q'), M::NONE, Action::Quit);
        self.register(ctx, K::Char('q'), M::CONTROL, Action::Quit);
        self.register(ctx, K::Esc, M::NONE, Action::Cancel);
    }

    /// Shortcuts while typing in the form. Everything else is text input.
    fn register_form_shortcuts(&mut self) {
        use KeyCode as K;
        use KeyModifiers as M;

        let ctx = FORM_CONTEXT;

        self.register(ctx, K::Tab, M::NONE, Action::NextField);
        self.register(ctx, K::Down, M::NONE, Action::NextField);
        self.register(ctx, K::BackTab, M::SHIFT, Action::PreviousField);
        self.register(ctx, K::BackTab, M::NONE, Action::PreviousField);
        self.register(ctx, K::Up, M::NONE, Action::PreviousField);
        self.register(ctx, K::Enter, M::NONE, Action::Submit);
        self.register(ctx, K::Esc, M::NONE, Action::FocusResults);

        self.register(ctx, K::Char('f'), M::CONTROL, Action::ToggleAdvancedFilters);
        self.register(ctx, K::Char('g'), M::CONTROL, Action::SetGridView);
        self.register(ctx, K::Char('l'), M::CONTROL, Action::SetListView);
        self.register(ctx, K::Char('d'), M::CONTROL, Action::ToggleTheme);
        self.register(ctx, K::Char('q'), M::CONTROL, Action::Quit);
    }

    /// Register a shortcut binding.
    fn register(&mut self, context: &str, code: KeyCode, modifiers: KeyModifiers, action: Action) {
        let binding = KeyBinding::new(code, modifiers);
        self.bindings.insert((context.to_string(), binding), action);
        self.order.push((context.to_string(), binding, action));
    }

    /// Look up an action for a given context and key event.
    #[must_use]
    pub fn lookup(&self, context: &str, event: KeyEvent) -> Option<Action> {
        let binding = KeyBinding::from_event(event);
        self.bindings.get(&(context.to_string(), binding)).copied()
    }

    /// Bindings of a context grouped by action, in registration order.
    #[must_use]
    pub fn help_rows(&self, context: &str) -> Vec<(String, Action)> {
        let mut rows: Vec<(Vec<String>, Action)> = Vec::new();

        for (ctx, binding, action) in &self.order {
            if ctx != context {
                continue;
            }
            match rows.iter_mut().find(|(_, a)| a == action) {
                Some((keys, _)) => {
                    let key = binding.display();
                    if !keys.contains(&key) {
                        keys.push(key);
                    }
                }
                None => rows.push((vec![binding.display()], *action)),
            }
        }

        rows.into_iter()
            .map(|(keys, action)| (keys.join(" / "), action))
            .collect()
    }
}

impl Default for ShortcutRegistry {
    fn default() -> Self {
        Self::new()
    }
}
