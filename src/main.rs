//! wiki-server
//!
//! Serves, edits and persists text pages addressed by title.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server ──▶ routing (validate title) ──▶ handlers
//!                                                                    │
//!                          ┌─────────────────────────────────────────┤
//!                          ▼                                         ▼
//!                   storage (<title>.txt)                  render (view/edit.html)
//!                          │                                         │
//!     ◀────────────────────┴──────── http::response ◀────────────────┘
//!     Client Response (200 HTML / 302 / 404 / 500)
//! ```

use clap::Parser;
use std::path::PathBuf;

use wiki_server::config::{read_config, validate_config, ConfigError, WikiConfig};
use wiki_server::lifecycle;
use wiki_server::observability::logging;

#[derive(Debug, Parser)]
#[command(name = "wiki-server")]
#[command(about = "A minimal file-backed wiki server", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on (overrides listener.bind_address)
    #[arg(short, long)]
    bind: Option<String>,

    /// Directory holding page files (overrides storage.data_dir)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Directory containing view.html and edit.html (overrides templates.dir)
    #[arg(long)]
    templates: Option<PathBuf>,
}

impl Cli {
    /// Read the config file (if any), apply flag overrides, then validate.
    fn resolve_config(&self) -> Result<WikiConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => WikiConfig::default(),
        };

        if let Some(bind) = &self.bind {
            config.listener.bind_address = bind.clone();
        }
        if let Some(dir) = &self.data_dir {
            config.storage.data_dir = dir.clone();
        }
        if let Some(dir) = &self.templates {
            config.templates.dir = Some(dir.clone());
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    logging::init(&config.observability.log_level);

    tracing::info!("wiki-server v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        data_dir = ?config.storage.data_dir,
        templates = ?config.templates.dir,
        "Configuration loaded"
    );

    lifecycle::start(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
