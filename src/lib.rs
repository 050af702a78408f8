//! KeyStudio Library
//!
//! This library provides the customization state engine of the keyboard
//! Studio: the configuration model, bounded undo/redo, shortcut dispatch and
//! versioned share tokens, plus the CLI and web front ends built on them.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod models;
pub mod services;
pub mod studio;
#[cfg(feature = "web")]
pub mod web;
