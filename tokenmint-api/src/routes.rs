//! API route configuration.

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))

        // Token issuance
        .route(
            "/generate_jwt",
            get(handlers::generate_token_query).post(handlers::generate_token),
        )

        .with_state(state)
}
