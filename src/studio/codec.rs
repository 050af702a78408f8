//! Share token encoding.
//!
//! A share token is `<version>.<payload>`. For version `v1` the payload is
//! the base64url (unpadded) encoding of a compact JSON document:
//!
//! ```text
//! {"b":["sixty_five","poly","fr4","linear","cherry","classic"],
//!  "o":{"K1":{"c":"FF0000"},"K2":{"c":"00FF00","l":"blank"}}}
//! ```
//!
//! `b` lists the base option ids in [`BaseField::ALL`] order and `o` holds the
//! per-key overrides. When the full token would exceed the configured
//! length budget, `o` is dropped and the outcome reports it.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::fmt;

use crate::constants::DEFAULT_MAX_TOKEN_LEN;
use crate::models::{
    BaseConfig, BaseField, ConfigModel, KeyOverride, KeyPosition, LegendStyle, RgbColor,
};

/// Token format versions understood by this codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenVersion {
    /// Base option list + optional override map, JSON in base64url
    V1,
}

impl TokenVersion {
    /// The version written by `encode`.
    pub const CURRENT: Self = Self::V1;

    /// Marker placed before the first `.` of a token.
    #[must_use]
    pub const fn marker(&self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }

    /// Parses a version marker.
    #[must_use]
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "v1" => Some(Self::V1),
            _ => None,
        }
    }
}

/// Why a token could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The version marker is missing from the set this build can read.
    #[error("Unsupported share token version '{0}'")]
    VersionUnsupported(String),
    /// The token is structurally invalid (empty, truncated, not base64, bad JSON).
    #[error("Malformed share token: {0}")]
    Malformed(String),
    /// A value is not a known option, legend, or key position of the layout.
    #[error("Share token references unknown {field} '{value}'")]
    InvalidReference {
        /// Field or kind of value that failed to resolve
        field: String,
        /// The offending value
        value: String,
    },
}

impl DecodeError {
    /// Stable identifier of the error kind for APIs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::VersionUnsupported(_) => "version_unsupported",
            Self::Malformed(_) => "malformed",
            Self::InvalidReference { .. } => "invalid_reference",
        }
    }

    fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed(reason.into())
    }

    fn invalid(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidReference {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// URL-safe encoded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShareToken(String);

impl ShareToken {
    /// Returns the token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the token, returning its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    /// Length in characters (tokens are ASCII).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the empty token; `encode` never produces one.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ShareToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of encoding a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOutcome {
    /// The encoded token
    pub token: ShareToken,
    /// True if per-key overrides were left out to respect the size budget
    pub overrides_excluded: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PayloadV1 {
    b: Vec<String>,
    #[serde(default)]
    o: BTreeMap<String, OverrideV1>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OverrideV1 {
    #[serde(default)]
    c: Option<String>,
    #[serde(default)]
    l: Option<String>,
}

/// Encodes and decodes share tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigCodec {
    max_token_len: usize,
}

impl Default for ConfigCodec {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TOKEN_LEN)
    }
}

impl ConfigCodec {
    /// Creates a codec with the given token length budget (in characters).
    #[must_use]
    pub const fn new(max_token_len: usize) -> Self {
        Self { max_token_len }
    }

    /// Creates a codec that never excludes overrides.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self::new(usize::MAX)
    }

    /// The token length budget.
    #[must_use]
    pub const fn max_token_len(&self) -> usize {
        self.max_token_len
    }

    /// Encodes a configuration.
    ///
    /// The selection is never encoded. If the complete token is longer than
    /// the budget, overrides are omitted and `overrides_excluded` is set; the
    /// base is always kept in full.
    #[must_use]
    pub fn encode(&self, config: &ConfigModel) -> EncodeOutcome {
        let full = Self::encode_v1(&config.base, &config.per_key_overrides);
        if full.len() <= self.max_token_len || config.per_key_overrides.is_empty() {
            return EncodeOutcome {
                token: ShareToken(full),
                overrides_excluded: false,
            };
        }

        tracing::debug!(
            full_len = full.len(),
            budget = self.max_token_len,
            overrides = config.per_key_overrides.len(),
            "Share token over budget, excluding per-key overrides"
        );

        EncodeOutcome {
            token: ShareToken(Self::encode_v1(&config.base, &BTreeMap::new())),
            overrides_excluded: true,
        }
    }

    fn encode_v1(base: &BaseConfig, overrides: &BTreeMap<KeyPosition, KeyOverride>) -> String {
        let options: Vec<&str> = base.entries().into_iter().map(|(_, id)| id).collect();

        let mut payload = Map::new();
        payload.insert("b".to_string(), json!(options));

        if !overrides.is_empty() {
            let encoded: Map<String, Value> = overrides
                .iter()
                .map(|(position, key_override)| {
                    let mut entry = Map::new();
                    if let Some(color) = key_override.color {
                        entry.insert("c".to_string(), Value::String(color.to_compact_hex()));
                    }
                    if let Some(legend) = key_override.legend {
                        entry.insert("l".to_string(), Value::String(legend.id().to_string()));
                    }
                    (position.as_str().to_string(), Value::Object(entry))
                })
                .collect();
            payload.insert("o".to_string(), Value::Object(encoded));
        }

        let json = Value::Object(payload).to_string();
        format!(
            "{}.{}",
            TokenVersion::V1.marker(),
            URL_SAFE_NO_PAD.encode(json.as_bytes())
        )
    }

    /// Decodes a token into a configuration.
    ///
    /// The result always satisfies the model invariants (full base, overrides
    /// only on keys of the decoded layout, empty selection); any violation is
    /// reported instead of returning a partial model.
    pub fn decode(&self, token: &str) -> Result<ConfigModel, DecodeError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(DecodeError::malformed("token is empty"));
        }

        let (marker, payload) = token
            .split_once('.')
            .ok_or_else(|| DecodeError::malformed("missing version marker"))?;

        match TokenVersion::from_marker(marker) {
            Some(TokenVersion::V1) => Self::decode_v1(payload),
            None => Err(DecodeError::VersionUnsupported(marker.to_string())),
        }
    }

    fn decode_v1(payload: &str) -> Result<ConfigModel, DecodeError> {
        if payload.is_empty() {
            return Err(DecodeError::malformed("payload is empty"));
        }

        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|e| DecodeError::malformed(format!("payload is not base64url: {e}")))?;
        let wire: PayloadV1 = serde_json::from_slice(&bytes)
            .map_err(|e| DecodeError::malformed(format!("payload is not a valid document: {e}")))?;

        if wire.b.len() != BaseField::ALL.len() {
            return Err(DecodeError::malformed(format!(
                "expected {} base options, found {}",
                BaseField::ALL.len(),
                wire.b.len()
            )));
        }

        let mut base = BaseConfig::default();
        for (field, option_id) in BaseField::ALL.iter().zip(&wire.b) {
            base.set(*field, option_id)
                .map_err(|_| DecodeError::invalid(field.id(), option_id.as_str()))?;
        }

        let layout = base.layout;
        let mut config = ConfigModel::new(base);
        for (key, entry) in wire.o {
            let position = KeyPosition::new(key);
            if !layout.contains(&position) {
                return Err(DecodeError::invalid("key position", position.as_str()));
            }

            let color = entry.c.map(|hex| parse_compact_hex(&hex)).transpose()?;
            let legend = entry
                .l
                .map(|id| LegendStyle::from_id(&id).ok_or_else(|| DecodeError::invalid("legend", id)))
                .transpose()?;

            let key_override = KeyOverride { color, legend };
            if key_override.is_empty() {
                return Err(DecodeError::malformed(format!(
                    "override for key '{position}' is empty"
                )));
            }
            config.per_key_overrides.insert(position, key_override);
        }

        Ok(config)
    }
}

/// Parses exactly six hex digits, the only color form `encode` writes.
fn parse_compact_hex(hex: &str) -> Result<RgbColor, DecodeError> {
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(DecodeError::malformed(format!("invalid color '{hex}'")));
    }
    RgbColor::from_hex(hex).map_err(|_| DecodeError::malformed(format!("invalid color '{hex}'")))
}
