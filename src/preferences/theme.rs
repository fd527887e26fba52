//! Persisted dark-mode preference mirrored onto the root style flag.

use anyhow::Result;
use tracing::{debug, info, warn};

use super::storage::PreferenceStorage;

/// Storage key of the dark-mode flag.
pub const DARK_MODE_KEY: &str = "darkMode";

/// Whether the operating system is currently in dark mode.
///
/// Unspecified or undetectable modes count as light.
#[must_use]
pub fn system_prefers_dark() -> bool {
    match dark_light::detect() {
        Ok(dark_light::Mode::Dark) => true,
        Ok(dark_light::Mode::Light | dark_light::Mode::Unspecified) => false,
        Err(e) => {
            debug!("Failed to detect system theme: {e}");
            false
        }
    }
}

/// Style switch applied to the whole presentation surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RootStyle {
    /// Whether the dark palette is applied
    pub dark: bool,
}

/// Light/dark preference backed by durable storage.
///
/// The in-memory flag, the stored value and the root style agree after every
/// mutation. [`ThemePreference::teardown`] is the one exception: it clears the
/// root style and leaves the stored preference alone.
#[derive(Debug)]
pub struct ThemePreference<S: PreferenceStorage> {
    storage: S,
    dark: bool,
    root: RootStyle,
}

impl<S: PreferenceStorage> ThemePreference<S> {
    /// Reads the stored preference and applies it to the root style.
    ///
    /// Only the stored string `"true"` selects dark mode. Missing, malformed
    /// or unreadable values fall back to light without an error.
    pub fn load(storage: S) -> Self {
        let dark = match storage.get(DARK_MODE_KEY) {
            Ok(Some(value)) if value.trim() == "true" => true,
            Ok(Some(value)) if value.trim() == "false" => false,
            Ok(Some(value)) => {
                debug!("Ignoring malformed {DARK_MODE_KEY} value {value:?}, using light mode");
                false
            }
            Ok(None) => false,
            Err(e) => {
                warn!("Failed to read theme preference, using light mode: {e:#}");
                false
            }
        };

        Self {
            storage,
            dark,
            root: RootStyle { dark },
        }
    }

    /// Current preference.
    pub fn is_dark(&self) -> bool {
        self.dark
    }

    /// Style currently applied to the root surface.
    pub fn root_style(&self) -> RootStyle {
        self.root
    }

    /// Flips the preference, applies it and persists it.
    ///
    /// If the write fails the flip is rolled back and the error returned.
    pub fn toggle(&mut self) -> Result<bool> {
        self.set_dark(!self.dark)
    }

    /// Sets the preference explicitly, applying and persisting it.
    pub fn set_dark(&mut self, dark: bool) -> Result<bool> {
        let previous = self.dark;
        self.dark = dark;
        self.root.dark = dark;

        if let Err(e) = self.storage.set(DARK_MODE_KEY, if dark { "true" } else { "false" }) {
            self.dark = previous;
            self.root.dark = previous;
            return Err(e.context("Failed to save theme preference"));
        }

        info!("Theme set to {}", if dark { "dark" } else { "light" });
        Ok(dark)
    }

    /// Resets the root style to light when the owning surface goes away.
    ///
    /// The stored preference is kept; the next [`ThemePreference::load`] re-applies it.
    pub fn teardown(&mut self) {
        self.root = RootStyle::default();
    }

    /// Access to the backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consumes the preference, returning its storage.
    pub fn into_storage(self) -> S {
        self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::storage::MemoryStorage;
    use anyhow::bail;

    struct ReadOnlyStorage;

    impl PreferenceStorage for ReadOnlyStorage {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(Some("true".to_string()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            bail!("read-only")
        }
    }

    #[test]
    fn test_missing_value_is_light() {
        let theme = ThemePreference::load(MemoryStorage::new());
        assert!(!theme.is_dark());
        assert!(!theme.root_style().dark);
    }

    #[test]
    fn test_non_boolean_value_is_light() {
        let theme = ThemePreference::load(MemoryStorage::with_value(DARK_MODE_KEY, "yes"));
        assert!(!theme.is_dark());
    }

    #[test]
    fn test_stored_dark_applied_at_load() {
        let theme = ThemePreference::load(MemoryStorage::with_value(DARK_MODE_KEY, "true"));
        assert!(theme.is_dark());
        assert!(theme.root_style().dark);
    }

    #[test]
    fn test_toggle_persists() {
        let mut theme = ThemePreference::load(MemoryStorage::new());
        assert!(theme.toggle().unwrap());

        assert!(theme.is_dark());
        assert!(theme.root_style().dark);
        assert_eq!(
            theme.storage().get(DARK_MODE_KEY).unwrap().as_deref(),
            Some("true")
        );
    }

    #[test]
    fn test_toggle_twice_restores_original() {
        let mut theme = ThemePreference::load(MemoryStorage::with_value(DARK_MODE_KEY, "false"));
        theme.toggle().unwrap();
        theme.toggle().unwrap();

        assert!(!theme.is_dark());
        assert!(!theme.root_style().dark);
        assert_eq!(
            theme.storage().get(DARK_MODE_KEY).unwrap().as_deref(),
            Some("false")
        );
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let mut theme = ThemePreference::load(ReadOnlyStorage);
        assert!(theme.is_dark());

        assert!(theme.toggle().is_err());
        assert!(theme.is_dark());
        assert!(theme.root_style().dark);
    }

    #[test]
    fn test_teardown_clears_root_only() {
        let mut theme = ThemePreference::load(MemoryStorage::with_value(DARK_MODE_KEY, "true"));
        theme.teardown();

        assert!(!theme.root_style().dark);
        assert!(theme.is_dark());

        let remounted = ThemePreference::load(theme.into_storage());
        assert!(remounted.root_style().dark);
    }
}
