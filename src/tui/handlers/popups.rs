//! Popup input handler.

use anyhow::Result;
use crossterm::event;

use crate::tui::component::Component;
use crate::tui::AppState;

/// Route input to the open popup. Only the help overlay exists today.
pub fn handle_popup_input(state: &mut AppState, key: event::KeyEvent) -> Result<bool> {
    if let Some(help) = state.help.as_mut() {
        help.handle_input(key);
        if help.should_close() {
            state.help = None;
        }
    }
    Ok(false)
}
