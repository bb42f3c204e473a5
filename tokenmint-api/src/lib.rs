//! # Tokenmint API Server
//!
//! HTTP surface for issuing signed tokens.
//!
//! ## Endpoints
//!
//! - `POST /generate_jwt` - Sign a JSON body: `{key, body, options?}`
//! - `GET /generate_jwt` - Same, with `key`, `body`, `algorithm`, `add_exp` query parameters
//! - `GET /health` - Liveness and cache backend
//!
//! ## Example
//!
//! ```rust,ignore
//! use tokenmint_api::{ApiServer, ApiConfig};
//!
//! let config = ApiConfig::from_env();
//! let server = ApiServer::new(config).await;
//! server.run(([0, 0, 0, 0], 8080)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod routes;
mod handlers;
mod state;
mod dto;
mod error;

pub use routes::create_router;
pub use state::{AppState, ApiConfig};
pub use error::ApiError;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// API server for tokenmint.
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a new API server, selecting the cache backend.
    pub async fn new(config: ApiConfig) -> Self {
        Self::with_state(Arc::new(AppState::new(config).await))
    }

    /// Creates a server around prepared state.
    pub fn with_state(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Creates the router with all routes configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address until Ctrl-C.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        handlers::mark_started();
        let listener = TcpListener::bind(addr).await?;

        info!("tokenmint API server listening on {}", addr);

        self.serve(listener, shutdown_signal()).await
    }

    /// Serves on an already bound listener until `shutdown` resolves,
    /// then tears down the cache.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let result = axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await;

        self.state.cache.shutdown().await;
        result
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
