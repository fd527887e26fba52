//! User preferences: the persisted theme and the session-only view mode.

pub mod storage;
pub mod theme;
pub mod view;

pub use storage::{FileStorage, MemoryStorage, PreferenceStorage};
pub use theme::{system_prefers_dark, RootStyle, ThemePreference, DARK_MODE_KEY};
pub use view::{ViewMode, ViewPreference};
