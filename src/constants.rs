//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the Studio defaults.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "KeyStudio";

/// Directory name under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "KeyStudio";

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "KEYSTUDIO_CONFIG_DIR";

/// Default number of history entries kept for undo/redo.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Upper bound accepted for the configured history limit.
pub const MAX_HISTORY_LIMIT: usize = 500;

/// Default maximum share token length in characters.
pub const DEFAULT_MAX_TOKEN_LEN: usize = 2000;

/// Smallest accepted share token budget; a base-only token must always fit.
pub const MIN_MAX_TOKEN_LEN: usize = 256;

/// Highest color preset number reachable through digit shortcuts.
pub const MAX_COLOR_PRESETS: usize = 9;

/// Default origin used to build share links.
pub const DEFAULT_SHARE_ORIGIN: &str = "https://keystudio.app";
