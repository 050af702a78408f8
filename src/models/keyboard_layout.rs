//! Key positions and the key sets of the supported layouts.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::LayoutKind;

/// Stable identifier of one physical key slot on a layout (e.g. "K1").
///
/// Identifiers run from `K1` to `Kn` where `n` is the layout's key count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyPosition(String);

impl KeyPosition {
    /// Creates a key position from its identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the position of the nth key (1-based).
    #[must_use]
    pub fn nth(n: usize) -> Self {
        Self(format!("K{n}"))
    }

    /// Returns the identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the 1-based key index if the identifier is canonical (`K<n>`, no leading zeros).
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        let digits = self.0.strip_prefix('K')?;
        if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }
}

impl fmt::Display for KeyPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KeyPosition {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl LayoutKind {
    /// Number of physical keys on this layout.
    #[must_use]
    pub const fn key_count(&self) -> usize {
        match self {
            Self::Sixty => 61,
            Self::SixtyFive => 68,
            Self::Tkl => 87,
            Self::FullSize => 104,
        }
    }

    /// All key positions of this layout, in order.
    #[must_use]
    pub fn positions(&self) -> Vec<KeyPosition> {
        (1..=self.key_count()).map(KeyPosition::nth).collect()
    }

    /// Checks whether a key position exists on this layout.
    #[must_use]
    pub fn contains(&self, position: &KeyPosition) -> bool {
        position
            .index()
            .is_some_and(|index| index <= self.key_count())
    }
}
