//! Falling & Catch Web Server Binary
//!
//! This binary starts the web server that serves the game pages and the
//! catalog API.
//!
//! # Usage
//!
//! ```bash
//! # Start with settings from the config file (default 127.0.0.1:8000)
//! fallcatch
//!
//! # Override port and catalog
//! fallcatch --port 8080 --catalog ./my_catalog.json
//!
//! # Write the effective settings to the config file
//! fallcatch --port 8080 --init
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fallcatch::config::Config;
use fallcatch::constants::{APP_BINARY_NAME, APP_NAME};
use fallcatch::web;

/// Falling & Catch - web server for the early-learning catch game
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Catalog JSON file replacing the built-in modes and levels
    #[arg(short, long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    init: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Applies command line overrides on top of the loaded configuration.
    fn apply(self, mut config: Config) -> Config {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(catalog) = self.catalog {
            config.catalog.path = Some(catalog);
        }
        config
    }
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

    info!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));

    // Load configuration (a missing file means defaults)
    let config = Config::load().context("Failed to load configuration")?;

    let init = args.init;
    let config = args.apply(config);
    config.validate().context("Invalid configuration")?;

    if init {
        let path = config.save()?;
        info!("Configuration written to {}", path.display());
        info!("Start the server with: {}", APP_BINARY_NAME);
        return Ok(());
    }

    web::run_server(config).await
}
