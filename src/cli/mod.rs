//! CLI command handlers for KeyStudio.
//!
//! This module provides headless, scriptable access to share tokens, the
//! option catalog and the configuration file.

pub mod catalog;
pub mod common;
pub mod config;
pub mod share;

// Re-export types used by main.rs and tests
pub use catalog::{LayoutsArgs, OptionsArgs};
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use share::{DecodeArgs, EncodeArgs};
