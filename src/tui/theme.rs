//! Color palettes for the light and dark presentation.
//!
//! The palette follows the stored dark-mode preference through [`RootStyle`],
//! not the terminal or OS setting.

use ratatui::style::Color;

use crate::preferences::RootStyle;

/// Semantic color theme for the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // Primary UI colors
    /// Primary color for borders, titles, and emphasis
    pub primary: Color,
    /// Accent color for highlights, selections, and focus states
    pub accent: Color,
    /// Success state color, used for prices
    pub success: Color,
    /// Error state color for validation and search errors
    pub error: Color,
    /// Warning state color for the searching indicator
    pub warning: Color,

    // Text hierarchy
    /// Primary text content color
    pub text: Color,
    /// Secondary text color for labels
    pub text_secondary: Color,
    /// Muted text color for hints and empty states
    pub text_muted: Color,

    // Backgrounds
    /// Main background color
    pub background: Color,
    /// Highlight/selection background color
    pub highlight_bg: Color,
    /// Surface color for cards and panels
    pub surface: Color,

    // State indicators
    /// Focused element color
    pub active: Color,
    /// Unfocused element color
    pub inactive: Color,
}

impl Theme {
    /// Palette for the given root style.
    #[must_use]
    pub const fn from_root(root: RootStyle) -> Self {
        if root.dark {
            Self::dark()
        } else {
            Self::light()
        }
    }

    /// Dark palette: bright chrome on a black background.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            accent: Color::Yellow,
            success: Color::Green,
            error: Color::Red,
            warning: Color::Yellow,

            text: Color::White,
            text_secondary: Color::Gray,
            text_muted: Color::DarkGray,

            background: Color::Black,
            highlight_bg: Color::DarkGray,
            surface: Color::Rgb(30, 30, 30),

            active: Color::Yellow,
            inactive: Color::Gray,
        }
    }

    /// Light palette: dark text on white, tuned for contrast.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::Blue,
            accent: Color::Rgb(180, 100, 0), // Dark orange for visibility
            success: Color::Rgb(0, 128, 0),  // Dark green
            error: Color::Red,
            warning: Color::Rgb(200, 100, 0),

            text: Color::Black,
            text_secondary: Color::Rgb(60, 60, 60),
            text_muted: Color::Gray,

            background: Color::White,
            highlight_bg: Color::Rgb(230, 230, 230),
            surface: Color::Rgb(245, 245, 245),

            active: Color::Rgb(180, 100, 0),
            inactive: Color::Rgb(180, 180, 180),
        }
    }

    /// Whether this is the dark palette.
    #[must_use]
    pub fn is_dark(&self) -> bool {
        *self == Self::dark()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_root(RootStyle::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_root() {
        assert_eq!(Theme::from_root(RootStyle { dark: true }), Theme::dark());
        assert_eq!(Theme::from_root(RootStyle { dark: false }), Theme::light());
    }

    #[test]
    fn test_default_is_light() {
        assert!(!Theme::default().is_dark());
    }

    #[test]
    fn test_theme_contrast() {
        let dark = Theme::dark();
        assert_eq!(dark.text, Color::White);
        assert_eq!(dark.background, Color::Black);

        let light = Theme::light();
        assert_eq!(light.text, Color::Black);
        assert_eq!(light.background, Color::White);
        // Yellow is too bright on a light background
        assert_ne!(light.accent, Color::Yellow);
    }
}
