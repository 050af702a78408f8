//! Clipboard access for share links.
//!
//! The controller writes through the [`ClipboardSink`] trait so a failing
//! system clipboard (no display server, permission denied) only produces a
//! notice.

use anyhow::{Context, Result};

/// Destination for copied text.
pub trait ClipboardSink {
    /// Replaces the clipboard contents with `text`.
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// System clipboard backed by `arboard`.
///
/// The platform handle is opened lazily on first use and kept afterwards.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    /// Creates a clipboard without touching the platform yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        if self.handle.is_none() {
            self.handle =
                Some(arboard::Clipboard::new().context("Failed to open system clipboard")?);
        }
        let clipboard = self
            .handle
            .as_mut()
            .context("System clipboard is unavailable")?;
        clipboard
            .set_text(text.to_string())
            .context("Failed to copy to clipboard")
    }
}

/// In-memory clipboard for headless use and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    fail_with: Option<String>,
}

impl MemoryClipboard {
    /// Creates an empty clipboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clipboard whose writes always fail with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            contents: None,
            fail_with: Some(reason.into()),
        }
    }

    /// Last text written, if any.
    #[must_use]
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        if let Some(reason) = &self.fail_with {
            anyhow::bail!("Failed to copy to clipboard: {reason}");
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}
