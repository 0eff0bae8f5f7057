//! Startup orchestration.
//!
//! # Responsibilities
//! - Load templates and build the HTTP server from a validated config
//! - Start the optional metrics exporter
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - Listener binds last (traffic only when ready)

use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::WikiConfig;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;
use crate::render::TemplateError;

/// Errors that stop the server from starting (or keep serving).
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("template setup failed: {0}")]
    Templates(#[from] TemplateError),

    #[error("invalid address {0:?}")]
    Address(String),

    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Start the wiki with a validated configuration and serve until a stop
/// signal arrives.
pub async fn start(config: WikiConfig) -> Result<(), StartupError> {
    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());
    run(config, shutdown).await
}

/// Same as [`start`], with shutdown driven by the caller.
pub async fn run(config: WikiConfig, shutdown: Shutdown) -> Result<(), StartupError> {
    let server = HttpServer::new(config.clone())?;

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| StartupError::Address(config.observability.metrics_address.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let address = config.listener.bind_address.clone();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;

    tracing::info!(
        address = %address,
        data_dir = ?config.storage.data_dir,
        request_timeout_secs = config.timeouts.request_secs,
        "Listening for connections"
    );

    server
        .run(listener, shutdown.subscribe())
        .await
        .map_err(StartupError::Serve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_missing_template_dir_is_fatal() {
        let mut config = WikiConfig::default();
        config.listener.bind_address = "127.0.0.1:0".into();
        config.templates.dir = Some(PathBuf::from("/no/such/templates"));

        let err = run(config, Shutdown::new()).await.unwrap_err();
        assert!(matches!(err, StartupError::Templates(TemplateError::Read { .. })));
    }

    #[tokio::test]
    async fn test_bind_failure_is_fatal() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mut config = WikiConfig::default();
        config.listener.bind_address = taken.local_addr().unwrap().to_string();

        let err = run(config, Shutdown::new()).await.unwrap_err();
        assert!(matches!(err, StartupError::Bind { .. }));
    }

    #[tokio::test]
    async fn test_runs_until_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = WikiConfig::default();
        config.listener.bind_address = "127.0.0.1:0".into();
        config.storage.data_dir = dir.path().to_path_buf();

        let shutdown = Shutdown::new();
        let handle = tokio::spawn(run(config, shutdown.clone()));

        // Give the server a moment to subscribe before signalling.
        while shutdown.receiver_count() == 0 {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        shutdown.trigger();

        assert!(handle.await.unwrap().is_ok());
    }
}
