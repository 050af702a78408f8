//! Data models for the Studio customization state.
//!
//! This module contains the core data structures used throughout the crate.
//! Models are independent of UI and controller logic.

pub mod config_model;
pub mod keyboard_layout;
pub mod options;
pub mod rgb;

// Re-export all model types
pub use config_model::{BaseConfig, BaseField, ConfigModel, KeyOverride, ResolvedKey};
pub use keyboard_layout::KeyPosition;
pub use options::{
    CaseFinish, Colorway, KeycapProfile, LayoutKind, LegendStyle, PlateMaterial, SwitchType,
};
pub use rgb::RgbColor;
