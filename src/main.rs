//! KeyStudio - keyboard customization share tokens from the command line
//!
//! This application encodes and decodes Studio share tokens, lists the
//! available layouts and options, and manages the configuration file.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use keystudio::cli::{
    CliResult, ConfigArgs, DecodeArgs, EncodeArgs, ExitCode, LayoutsArgs, OptionsArgs,
};

/// KeyStudio - keyboard customization share tokens
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode a configuration JSON file into a share token
    Encode(EncodeArgs),
    /// Decode a share token or link
    Decode(DecodeArgs),
    /// List supported layouts
    Layouts(LayoutsArgs),
    /// List configuration fields and their options
    Options(OptionsArgs),
    /// Manage the configuration file
    Config(ConfigArgs),
}

impl Command {
    fn execute(&self) -> CliResult<()> {
        match self {
            Self::Encode(args) => args.execute(),
            Self::Decode(args) => args.execute(),
            Self::Layouts(args) => args.execute(),
            Self::Options(args) => args.execute(),
            Self::Config(args) => args.execute(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so JSON output on stdout stays parseable
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let code = match cli.command.execute() {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("Error: {e}");
            e.exit_code()
        }
    };

    std::process::exit(code.code());
}
