//! Studio view preferences kept in local storage.
//!
//! These are independent of the configuration model and of share tokens.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::local_store::LocalStore;

/// Storage key of the grid preference.
pub const GRID_KEY: &str = "studio.grid";
/// Storage key of the camera view preference.
pub const VIEW_KEY: &str = "studio.view";
/// Storage key of the "dismissed guide" flag.
pub const GUIDE_DISMISSED_KEY: &str = "studio.guideDismissed";

/// Grid overlay drawn behind the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridMode {
    /// No grid
    Off,
    /// Line grid
    #[default]
    Lines,
    /// Dot grid
    Dots,
}

/// Camera angle of the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Three-quarter perspective
    #[default]
    Perspective,
    /// Straight from above
    Top,
    /// From the front edge
    Side,
}

/// Persisted Studio view preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StudioPreferences {
    /// Grid overlay
    pub grid: GridMode,
    /// Camera angle
    pub view: ViewMode,
    /// Whether the getting-started guide was dismissed
    pub guide_dismissed: bool,
}

impl StudioPreferences {
    /// Reads preferences from the store.
    ///
    /// Missing keys and values of the wrong shape fall back to defaults.
    #[must_use]
    pub fn load(store: &LocalStore) -> Self {
        fn read<T: serde::de::DeserializeOwned + Default>(store: &LocalStore, key: &str) -> T {
            store.get(key).unwrap_or_else(|e| {
                tracing::warn!("Ignoring stored preference: {e:#}");
                None
            })
            .unwrap_or_default()
        }

        Self {
            grid: read(store, GRID_KEY),
            view: read(store, VIEW_KEY),
            guide_dismissed: read(store, GUIDE_DISMISSED_KEY),
        }
    }

    /// Writes preferences into the store and persists it.
    pub fn save(&self, store: &mut LocalStore) -> Result<()> {
        store.set(GRID_KEY, &self.grid)?;
        store.set(VIEW_KEY, &self.view)?;
        store.set(GUIDE_DISMISSED_KEY, &self.guide_dismissed)?;
        store.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_store_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = LocalStore::open(temp_dir.path().join("store.json")).unwrap();
        let prefs = StudioPreferences::load(&store);
        assert_eq!(prefs, StudioPreferences::default());
        assert!(!prefs.guide_dismissed);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        let mut store = LocalStore::open(&path).unwrap();

        let prefs = StudioPreferences {
            grid: GridMode::Dots,
            view: ViewMode::Top,
            guide_dismissed: true,
        };
        prefs.save(&mut store).unwrap();

        let reopened = LocalStore::open(&path).unwrap();
        assert_eq!(StudioPreferences::load(&reopened), prefs);
        assert_eq!(reopened.get::<bool>(GUIDE_DISMISSED_KEY).unwrap(), Some(true));
        assert_eq!(reopened.get::<String>(GRID_KEY).unwrap(), Some("dots".to_string()));
    }

    #[test]
    fn test_bad_value_falls_back_to_default() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = LocalStore::open(temp_dir.path().join("store.json")).unwrap();
        store.set(VIEW_KEY, &"upside_down").unwrap();
        store.set(GUIDE_DISMISSED_KEY, &true).unwrap();

        let prefs = StudioPreferences::load(&store);
        assert_eq!(prefs.view, ViewMode::Perspective);
        assert!(prefs.guide_dismissed);
    }
}
