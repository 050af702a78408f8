//! Services around the Studio core: clipboard access and local storage.

pub mod clipboard;
pub mod local_store;
pub mod preferences;

pub use clipboard::{ClipboardSink, MemoryClipboard, SystemClipboard};
pub use local_store::LocalStore;
pub use preferences::{GridMode, StudioPreferences, ViewMode};
