//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the view/edit/save routing table
//! - Wire up middleware (tracing, request ID, timeout, body limit, metrics)
//! - Build the shared application state (router, page store, templates)
//! - Serve on a listener until the shutdown signal fires

use axum::{
    http::{header, HeaderValue, StatusCode},
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer, set_header::SetResponseHeaderLayer, timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::WikiConfig;
use crate::http::handlers;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::observability::metrics;
use crate::render::{TemplateError, TemplateRegistry};
use crate::routing::{Route, Router as TitleRouter};
use crate::storage::PageStore;

/// Requests running longer than `secs` get a 408.
fn timeout_layer(secs: u64) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, Duration::from_secs(secs))
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<TitleRouter>,
    pub store: Arc<PageStore>,
    pub templates: Arc<TemplateRegistry>,
}

/// HTTP server for the wiki.
pub struct HttpServer {
    router: Router,
    config: WikiConfig,
}

impl HttpServer {
    /// Create a server, loading templates as the configuration says.
    pub fn new(config: WikiConfig) -> Result<Self, TemplateError> {
        let templates = TemplateRegistry::from_config(&config.templates)?;
        Ok(Self::with_templates(config, templates))
    }

    /// Create a server around an already-built template registry.
    pub fn with_templates(config: WikiConfig, templates: TemplateRegistry) -> Self {
        let state = AppState {
            router: Arc::new(TitleRouter::new()),
            store: Arc::new(PageStore::from_config(&config.storage)),
            templates: Arc::new(templates),
        };

        tracing::debug!(
            data_dir = ?config.storage.data_dir,
            "Page store ready"
        );

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &WikiConfig, state: AppState) -> Router {
        let router = Router::new()
            .route(
                Route::View.path_template(),
                get(handlers::view).fallback(handlers::method_not_allowed),
            )
            .route(
                Route::Edit.path_template(),
                get(handlers::edit).fallback(handlers::method_not_allowed),
            )
            .route(
                Route::Save.path_template(),
                post(handlers::save).fallback(handlers::method_not_allowed),
            )
            .fallback(handlers::not_found)
            .with_state(state)
            .layer(middleware::from_fn(metrics::track_requests))
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(timeout_layer(config.timeouts.request_secs))
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http())
                    .layer(propagate_request_id_layer()),
            );

        if config.security.enable_headers {
            router.layer(SetResponseHeaderLayer::if_not_present(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
        } else {
            router
        }
    }

    /// A clone of the routing table, for driving the app without a socket.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            data_dir = ?self.config.storage.data_dir,
            "HTTP server starting"
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
