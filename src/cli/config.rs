//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::constants::APP_NAME;
use clap::{Args, Subcommand};
use serde::Serialize;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
    /// Print the configuration file path
    Path,
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Origin used for share and builder links
    #[arg(long, value_name = "URL")]
    origin: Option<String>,

    /// Maximum share token length in characters
    #[arg(long, value_name = "CHARS")]
    max_token_len: Option<usize>,

    /// Number of undo steps kept
    #[arg(long, value_name = "STEPS")]
    history_limit: Option<usize>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput<'a> {
    studio: StudioOutput,
    share: &'a crate::config::ShareSettings,
    ui: &'a crate::config::UiConfig,
}

#[derive(Serialize, Debug)]
struct StudioOutput {
    history_limit: usize,
    presets: Vec<PresetOutput>,
}

#[derive(Serialize, Debug)]
struct PresetOutput {
    key: usize,
    name: String,
    color: String,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
            ConfigCommand::Path => {
                let path = Config::config_file_path().map_err(|e| CliError::io(format!("{e:#}")))?;
                println!("{}", path.display());
                Ok(())
            }
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            output_json(&config)
        } else {
            output_human_readable(&config);
            Ok(())
        }
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.origin.is_none() && self.max_token_len.is_none() && self.history_limit.is_none() {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --origin, --max-token-len, or --history-limit",
            ));
        }

        let mut config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if let Some(origin) = &self.origin {
            config
                .set_share_origin(origin)
                .map_err(|e| CliError::validation(format!("{e:#}")))?;
        }
        if let Some(max_token_len) = self.max_token_len {
            config.share.max_token_len = max_token_len;
        }
        if let Some(history_limit) = self.history_limit {
            config.studio.history_limit = history_limit;
        }

        config
            .validate()
            .map_err(|e| CliError::validation(format!("{e:#}")))?;
        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

/// Output configuration in JSON format
fn output_json(config: &Config) -> CliResult<()> {
    let output = ConfigOutput {
        studio: StudioOutput {
            history_limit: config.studio.history_limit,
            presets: config
                .studio
                .presets
                .iter()
                .enumerate()
                .map(|(index, preset)| PresetOutput {
                    key: index + 1,
                    name: preset.name.clone(),
                    color: preset.color.to_hex(),
                })
                .collect(),
        },
        share: &config.share,
        ui: &config.ui,
    };

    print_json(&output)
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    let title = format!("{APP_NAME} Configuration");
    println!("{title}");
    println!("{}", "=".repeat(title.len()));
    println!();

    println!("Studio:");
    println!("  History Limit: {}", config.studio.history_limit);
    println!("  Presets:");
    for (index, preset) in config.studio.presets.iter().enumerate() {
        println!("    {} {} {}", index + 1, preset.color, preset.name);
    }
    println!();

    println!("Share:");
    println!("  Origin: {}", config.share.origin);
    println!("  Max Token Length: {}", config.share.max_token_len);
    println!();

    println!("UI:");
    println!("  Show Guide On Startup: {}", config.ui.show_guide_on_startup);
    println!();
}
