//! KeyStudio Web Server Binary
//!
//! This binary starts the KeyStudio web server that encodes and decodes
//! share tokens for the browser Studio.
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings (port 3001)
//! keystudio-web
//!
//! # Specify port and host
//! keystudio-web --port 8080 --host 0.0.0.0
//! ```

use std::net::SocketAddr;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use keystudio::config::Config;
use keystudio::web;

/// KeyStudio Web Server - REST API for share links
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3001")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("Using default configuration: {e:#}");
        Config::default()
    });

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;

    web::run_server(config, addr).await
}
