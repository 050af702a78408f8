//! Share token CLI commands: `encode` and `decode`.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::models::ConfigModel;
use crate::studio::{ConfigCodec, ShareLinks};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Encode a configuration file into a share token
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Path to a configuration JSON file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Decode a share token or link
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Share token, studio link or builder link
    #[arg(value_name = "TOKEN|URL")]
    input: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize, Debug)]
struct EncodeOutput {
    token: String,
    share_link: String,
    builder_link: String,
    token_length: usize,
    overrides_excluded: bool,
}

#[derive(Serialize, Debug)]
struct DecodeFailure<'a> {
    error: String,
    kind: &'a str,
}

impl EncodeArgs {
    /// Execute encode command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_settings()?;

        let content = std::fs::read_to_string(&self.file).map_err(|e| {
            CliError::io(format!("Failed to read {}: {e}", self.file.display()))
        })?;
        let model: ConfigModel = serde_json::from_str(&content).map_err(|e| {
            CliError::validation(format!(
                "Invalid configuration in {}: {e}",
                self.file.display()
            ))
        })?;
        model
            .validate()
            .map_err(|e| CliError::validation(format!("Invalid configuration: {e}")))?;

        let links = ShareLinks::new(&config.share.origin)
            .map_err(|e| CliError::validation(format!("{e:#}")))?;
        let encoded = ConfigCodec::new(config.share.max_token_len).encode(&model);

        if encoded.overrides_excluded {
            eprintln!(
                "Warning: per-key overrides were left out; the token would exceed {} characters",
                config.share.max_token_len
            );
        }

        let output = EncodeOutput {
            share_link: links.studio_link(&encoded.token),
            builder_link: links.builder_link(&encoded.token),
            token_length: encoded.token.len(),
            token: encoded.token.into_string(),
            overrides_excluded: encoded.overrides_excluded,
        };

        if self.json {
            print_json(&output)?;
        } else {
            println!("Token:        {}", output.token);
            println!("Share link:   {}", output.share_link);
            println!("Builder link: {}", output.builder_link);
        }

        Ok(())
    }
}

impl DecodeArgs {
    /// Execute decode command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_settings()?;
        let input = self.input.trim();
        let token = if input.contains("://") || input.starts_with('/') {
            ShareLinks::token_from_url(input).ok_or_else(|| {
                CliError::validation(format!("No share token found in link '{input}'"))
            })?
        } else {
            input.to_string()
        };

        match ConfigCodec::new(config.share.max_token_len).decode(&token) {
            Ok(model) => {
                if self.json {
                    print_json(&model)?;
                } else {
                    print_model(&model);
                }
                Ok(())
            }
            Err(e) => {
                if self.json {
                    print_json(&DecodeFailure {
                        error: e.to_string(),
                        kind: e.kind(),
                    })?;
                }
                Err(CliError::validation(format!("Failed to decode token: {e}")))
            }
        }
    }
}

fn load_settings() -> CliResult<Config> {
    Config::load()
        .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))
}

fn print_model(model: &ConfigModel) {
    println!("Base:");
    for (field, option) in model.base.entries() {
        println!("  {:<10} {option}", field.id());
    }

    if model.per_key_overrides.is_empty() {
        println!("Overrides: (none)");
        return;
    }

    println!("Overrides:");
    for (position, key_override) in &model.per_key_overrides {
        let color = key_override
            .color
            .map_or_else(|| "-".to_string(), |color| color.to_hex());
        let legend = key_override
            .legend
            .map_or_else(|| "-".to_string(), |legend| legend.to_string());
        println!("  {position:<5} color {color:<8} legend {legend}");
    }
}
