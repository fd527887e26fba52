//! Main UI input handler.

use anyhow::Result;
use crossterm::event;

use crate::shortcuts::ShortcutRegistry;
use crate::tui::component::Component;
use crate::tui::{AppState, Focus};

/// Handle input for main UI
///
/// Registered shortcuts win; remaining keys go to the search form when it has focus.
pub fn handle_main_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    let registry = ShortcutRegistry::new();

    if let Some(action) = registry.lookup(state.shortcut_context(), key) {
        return super::dispatch_action(state, action);
    }

    if state.focus == Focus::Form {
        if let Some(update) = state.form.handle_input(key) {
            state.apply_criteria(update);
        }
    }

    Ok(false)
}
