//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router from the dispatch table
//! - Wire up middleware (tracing, request ID, metrics, CORS, preflight)
//! - Bind server to listener and serve until shutdown

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request},
    middleware, Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::config::ProxyConfig;
use crate::http::middleware::{preflight, CorsHeaders};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, RequestIdExt};
use crate::lifecycle::ShutdownSignal;
use crate::observability::metrics::track_requests;
use crate::routing::dispatch_table;
use crate::soundcloud::{SoundCloudClient, SoundCloudResult, TrackNormalizer};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProxyConfig>,
    pub soundcloud: SoundCloudClient,
    pub normalizer: TrackNormalizer,
}

/// HTTP server for the search proxy.
pub struct HttpServer {
    router: Router,
    config: Arc<ProxyConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> SoundCloudResult<Self> {
        let soundcloud = SoundCloudClient::new(&config.soundcloud)?;
        let normalizer = TrackNormalizer::new(config.soundcloud.site_base_url.clone());
        let config = Arc::new(config);

        let state = AppState {
            config: config.clone(),
            soundcloud,
            normalizer,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    /// Layers run top to bottom on the way in.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        let cors = CorsHeaders::from_config(&config.cors);

        dispatch_table().with_state(state).layer(
            ServiceBuilder::new()
                .layer(set_request_id_layer())
                .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        method = %request.method(),
                        path = %request.uri().path(),
                        request_id = %request.headers().request_id()
                    )
                }))
                .layer(propagate_request_id_layer())
                .layer(middleware::from_fn(track_requests))
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_ORIGIN,
                    cors.allow_origin,
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_METHODS,
                    cors.allow_methods,
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::ACCESS_CONTROL_ALLOW_HEADERS,
                    cors.allow_headers,
                ))
                .layer(middleware::from_fn(preflight)),
        )
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(self, listener: TcpListener, shutdown: ShutdownSignal) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            service = %self.config.server.name,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.recv())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}
