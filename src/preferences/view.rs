//! Grid/list result view selection. Not persisted.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Result card layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Cards laid out in columns
    #[default]
    Grid,
    /// One row per flight
    List,
}

impl ViewMode {
    /// Identifier used on the command line.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
        }
    }
}

impl FromStr for ViewMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "grid" => Ok(Self::Grid),
            "list" => Ok(Self::List),
            other => anyhow::bail!("Invalid view mode '{other}'. Must be grid or list"),
        }
    }
}

/// Session-scoped view preference. Every fresh instance starts in grid mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewPreference {
    mode: ViewMode,
}

impl ViewPreference {
    /// Creates the preference in grid mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Switches to grid cards.
    pub fn set_grid(&mut self) {
        self.mode = ViewMode::Grid;
    }

    /// Switches to list rows.
    pub fn set_list(&mut self) {
        self.mode = ViewMode::List;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_grid() {
        assert_eq!(ViewPreference::new().mode(), ViewMode::Grid);
    }

    #[test]
    fn test_set_grid_then_list() {
        let mut view = ViewPreference::new();
        view.set_grid();
        view.set_list();
        assert_eq!(view.mode(), ViewMode::List);

        // A new session starts over
        assert_eq!(ViewPreference::new().mode(), ViewMode::Grid);
    }

    #[test]
    fn test_setters_are_unconditional() {
        let mut view = ViewPreference::new();
        view.set_list();
        view.set_list();
        assert_eq!(view.mode(), ViewMode::List);
    }

    #[test]
    fn test_parse() {
        assert_eq!("LIST".parse::<ViewMode>().unwrap(), ViewMode::List);
        assert!("table".parse::<ViewMode>().is_err());
    }
}
