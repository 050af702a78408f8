//! Shared test fixtures for integration tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use keystudio::models::{
    BaseConfig, CaseFinish, Colorway, ConfigModel, KeyOverride, KeyPosition, LayoutKind,
    LegendStyle, RgbColor,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Path to the keystudio binary
pub fn keystudio_bin() -> String {
    std::env::var("CARGO_BIN_EXE_keystudio")
        .unwrap_or_else(|_| "target/debug/keystudio".to_string())
}

/// Creates a Command with an isolated config directory.
pub fn isolated_command(args: &[&str], config_dir: &Path) -> Command {
    let mut cmd = Command::new(keystudio_bin());
    cmd.env("KEYSTUDIO_CONFIG_DIR", config_dir);
    cmd.env_remove("RUST_LOG");
    cmd.args(args);
    cmd
}

/// A 65% aluminum build with two customized keys.
pub fn sample_model() -> ConfigModel {
    let mut model = ConfigModel::new(BaseConfig {
        case: CaseFinish::Aluminum,
        colorway: Colorway::Olivia,
        ..BaseConfig::default()
    });
    model.per_key_overrides.insert(
        KeyPosition::nth(1),
        KeyOverride::color(RgbColor::new(0xE8, 0x3A, 0x3A)),
    );
    model.per_key_overrides.insert(
        KeyPosition::nth(2),
        KeyOverride::legend(LegendStyle::Blank).with_color(RgbColor::new(0x20, 0x20, 0x20)),
    );
    model
}

/// A model on `layout` with a distinct color on the first `count` keys.
///
/// Colors are deterministic so token lengths are stable across runs.
pub fn model_with_overrides(layout: LayoutKind, count: usize) -> ConfigModel {
    let mut model = ConfigModel::new(BaseConfig {
        layout,
        ..BaseConfig::default()
    });
    for (index, position) in layout.positions().into_iter().take(count).enumerate() {
        let shade = u8::try_from(index % 256).unwrap_or(0);
        model.per_key_overrides.insert(
            position,
            KeyOverride::color(RgbColor::new(shade, shade.wrapping_mul(7), 255 - shade)),
        );
    }
    model
}

/// Writes a model as JSON into `dir` and returns the file path.
pub fn write_model_file(dir: &Path, name: &str, model: &ConfigModel) -> PathBuf {
    let path = dir.join(name);
    let json = serde_json::to_string_pretty(model).expect("Failed to serialize model");
    fs::write(&path, json).expect("Failed to write model file");
    path
}
