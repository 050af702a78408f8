//! The Studio customization engine.
//!
//! - [`history`]: bounded undo/redo
//! - [`shortcuts`]: key combinations to commands
//! - [`surface`]: scoped keyboard listener registration
//! - [`codec`]: share token encoding
//! - [`links`]: share and build-transfer links
//! - [`controller`]: one editing session tying the above together

pub mod codec;
pub mod controller;
pub mod history;
pub mod links;
pub mod shortcuts;
pub mod surface;

pub use codec::{ConfigCodec, DecodeError, EncodeOutcome, ShareToken, TokenVersion};
pub use controller::{BuildRequest, Notice, NoticeLevel, ShareOutcome, StudioController};
pub use history::HistoryStack;
pub use links::ShareLinks;
pub use shortcuts::{FocusTarget, ShortcutDispatcher, ShortcutEvent, StudioCommand};
pub use surface::{KeySurface, ListenerGuard};
