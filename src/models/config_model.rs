//! The customization state edited in the Studio.
//!
//! A [`ConfigModel`] is a plain value: global choices ([`BaseConfig`]),
//! optional per-key overrides and the transient key selection. It carries no
//! behavior beyond validation and lookups; the controller produces new models
//! for every edit.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::{
    CaseFinish, Colorway, KeyPosition, KeycapProfile, LayoutKind, LegendStyle, PlateMaterial,
    RgbColor, SwitchType,
};

/// Identifier of one global configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseField {
    /// Target layout
    Layout,
    /// Case finish
    Case,
    /// Plate material
    Plate,
    /// Switch type
    Switches,
    /// Keycap profile
    Keycaps,
    /// Keycap colorway
    Colorway,
}

impl BaseField {
    /// Every field, in the order used by share tokens.
    pub const ALL: &'static [Self] = &[
        Self::Layout,
        Self::Case,
        Self::Plate,
        Self::Switches,
        Self::Keycaps,
        Self::Colorway,
    ];

    /// Stable field identifier.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Layout => "layout",
            Self::Case => "case",
            Self::Plate => "plate",
            Self::Switches => "switches",
            Self::Keycaps => "keycaps",
            Self::Colorway => "colorway",
        }
    }

    /// Looks up a field by identifier.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.id() == id)
    }

    /// Option identifiers accepted by this field.
    #[must_use]
    pub fn option_ids(&self) -> Vec<&'static str> {
        fn ids<T: Copy>(all: &[T], id: fn(&T) -> &'static str) -> Vec<&'static str> {
            all.iter().map(id).collect()
        }

        match self {
            Self::Layout => ids(LayoutKind::ALL, LayoutKind::id),
            Self::Case => ids(CaseFinish::ALL, CaseFinish::id),
            Self::Plate => ids(PlateMaterial::ALL, PlateMaterial::id),
            Self::Switches => ids(SwitchType::ALL, SwitchType::id),
            Self::Keycaps => ids(KeycapProfile::ALL, KeycapProfile::id),
            Self::Colorway => ids(Colorway::ALL, Colorway::id),
        }
    }
}

/// Global choices. Every field always holds a value, so a base can never be partial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseConfig {
    /// Target layout
    pub layout: LayoutKind,
    /// Case finish
    pub case: CaseFinish,
    /// Plate material
    pub plate: PlateMaterial,
    /// Switch type
    pub switches: SwitchType,
    /// Keycap profile
    pub keycaps: KeycapProfile,
    /// Keycap colorway
    pub colorway: Colorway,
}

impl Default for BaseConfig {
    fn default() -> Self {
        Self {
            layout: LayoutKind::SixtyFive,
            case: CaseFinish::Poly,
            plate: PlateMaterial::Fr4,
            switches: SwitchType::Linear,
            keycaps: KeycapProfile::Cherry,
            colorway: Colorway::Classic,
        }
    }
}

impl BaseConfig {
    /// Returns the option identifier currently chosen for a field.
    #[must_use]
    pub const fn get(&self, field: BaseField) -> &'static str {
        match field {
            BaseField::Layout => self.layout.id(),
            BaseField::Case => self.case.id(),
            BaseField::Plate => self.plate.id(),
            BaseField::Switches => self.switches.id(),
            BaseField::Keycaps => self.keycaps.id(),
            BaseField::Colorway => self.colorway.id(),
        }
    }

    /// Sets a field from an option identifier.
    ///
    /// Fails without modifying `self` if the identifier is not one of the
    /// field's known options.
    pub fn set(&mut self, field: BaseField, option_id: &str) -> Result<()> {
        fn lookup<T>(found: Option<T>, field: BaseField, option_id: &str) -> Result<T> {
            found.ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown option '{option_id}' for field '{}'. Expected one of: {}",
                    field.id(),
                    field.option_ids().join(", ")
                )
            })
        }

        match field {
            BaseField::Layout => self.layout = lookup(LayoutKind::from_id(option_id), field, option_id)?,
            BaseField::Case => self.case = lookup(CaseFinish::from_id(option_id), field, option_id)?,
            BaseField::Plate => self.plate = lookup(PlateMaterial::from_id(option_id), field, option_id)?,
            BaseField::Switches => {
                self.switches = lookup(SwitchType::from_id(option_id), field, option_id)?;
            }
            BaseField::Keycaps => {
                self.keycaps = lookup(KeycapProfile::from_id(option_id), field, option_id)?;
            }
            BaseField::Colorway => {
                self.colorway = lookup(Colorway::from_id(option_id), field, option_id)?;
            }
        }
        Ok(())
    }

    /// The base as an ordered (field, option id) mapping.
    #[must_use]
    pub fn entries(&self) -> Vec<(BaseField, &'static str)> {
        BaseField::ALL
            .iter()
            .map(|field| (*field, self.get(*field)))
            .collect()
    }
}

/// Per-key customization. At least one of the fields is set for a stored override.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyOverride {
    /// Keycap color override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<RgbColor>,
    /// Legend style override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<LegendStyle>,
}

impl KeyOverride {
    /// Creates an override that only changes the color.
    #[must_use]
    pub const fn color(color: RgbColor) -> Self {
        Self {
            color: Some(color),
            legend: None,
        }
    }

    /// Creates an override that only changes the legend.
    #[must_use]
    pub const fn legend(legend: LegendStyle) -> Self {
        Self {
            color: None,
            legend: Some(legend),
        }
    }

    /// Sets the color of this override.
    #[must_use]
    pub const fn with_color(mut self, color: RgbColor) -> Self {
        self.color = Some(color);
        self
    }

    /// Sets the legend of this override.
    #[must_use]
    pub const fn with_legend(mut self, legend: LegendStyle) -> Self {
        self.legend = Some(legend);
        self
    }

    /// True if the override changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.color.is_none() && self.legend.is_none()
    }
}

/// Effective appearance of one key after applying overrides over the base defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedKey {
    /// Keycap color
    pub color: RgbColor,
    /// Legend style
    pub legend: LegendStyle,
}

/// One customization state.
///
/// # Validation
///
/// - Every override key must exist on `base.layout`
/// - Stored overrides must not be empty
/// - Every selected key must exist on `base.layout`
///
/// `selection` is session-local: it is skipped by serde and never encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigModel {
    /// Global choices
    pub base: BaseConfig,
    /// Per-key overrides keyed by position
    #[serde(default)]
    pub per_key_overrides: BTreeMap<KeyPosition, KeyOverride>,
    /// Keys selected for batch editing
    #[serde(skip)]
    pub selection: BTreeSet<KeyPosition>,
}

impl ConfigModel {
    /// Creates a model with the given base, no overrides and no selection.
    #[must_use]
    pub fn new(base: BaseConfig) -> Self {
        Self {
            base,
            per_key_overrides: BTreeMap::new(),
            selection: BTreeSet::new(),
        }
    }

    /// Target layout of this configuration.
    #[must_use]
    pub const fn layout(&self) -> LayoutKind {
        self.base.layout
    }

    /// Returns the override stored for a key, if any.
    #[must_use]
    pub fn override_for(&self, position: &KeyPosition) -> Option<&KeyOverride> {
        self.per_key_overrides.get(position)
    }

    /// Resolves the effective appearance of a key.
    #[must_use]
    pub fn resolved_key(&self, position: &KeyPosition) -> ResolvedKey {
        let key_override = self.override_for(position).copied().unwrap_or_default();
        ResolvedKey {
            color: key_override
                .color
                .unwrap_or_else(|| self.base.colorway.keycap_color()),
            legend: key_override.legend.unwrap_or_default(),
        }
    }

    /// Validates the model invariants against its layout.
    pub fn validate(&self) -> Result<()> {
        let layout = self.layout();

        for (position, key_override) in &self.per_key_overrides {
            if !layout.contains(position) {
                anyhow::bail!(
                    "Override references key '{position}' which does not exist on layout '{layout}'"
                );
            }
            if key_override.is_empty() {
                anyhow::bail!("Override for key '{position}' is empty");
            }
        }

        if let Some(position) = self.selection.iter().find(|p| !layout.contains(p)) {
            anyhow::bail!(
                "Selection references key '{position}' which does not exist on layout '{layout}'"
            );
        }

        Ok(())
    }

    /// Drops overrides and selected keys that do not exist on the current layout.
    ///
    /// Returns the number of overrides removed.
    pub fn retain_layout(&mut self) -> usize {
        let layout = self.layout();
        let before = self.per_key_overrides.len();
        self.per_key_overrides
            .retain(|position, key_override| layout.contains(position) && !key_override.is_empty());
        self.selection.retain(|position| layout.contains(position));
        before - self.per_key_overrides.len()
    }

    /// Returns a copy of this model with an empty selection.
    #[must_use]
    pub fn without_selection(&self) -> Self {
        Self {
            base: self.base,
            per_key_overrides: self.per_key_overrides.clone(),
            selection: BTreeSet::new(),
        }
    }

    /// True if both models describe the same keyboard, ignoring selection.
    #[must_use]
    pub fn same_design(&self, other: &Self) -> bool {
        self.base == other.base && self.per_key_overrides == other.per_key_overrides
    }
}
