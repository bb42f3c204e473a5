//! API route handlers.

use std::sync::{Arc, OnceLock};
use std::time::Instant;

use axum::{
    extract::{rejection::{JsonRejection, QueryRejection}, Query, State},
    Json,
};
use tracing::debug;

use tokenmint_core::error::TokenMintError;
use tokenmint_core::types::{Claims, SigningOptions, SigningRequest};

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

static START_TIME: OnceLock<Instant> = OnceLock::new();

/// Records the process start for uptime reporting.
pub fn mark_started() {
    START_TIME.get_or_init(Instant::now);
}

/// POST /generate_jwt
pub async fn generate_token(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<GenerateTokenRequest>, JsonRejection>,
) -> Result<Json<GenerateTokenResponse>> {
    let Json(req) = payload?;
    issue(&state, req.into()).await
}

/// GET /generate_jwt
pub async fn generate_token_query(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<Query<GenerateTokenQuery>, QueryRejection>,
) -> Result<Json<GenerateTokenResponse>> {
    let Query(query) = query?;

    let payload = match query.body.as_deref() {
        Some(raw) => parse_claims(raw)?,
        None => Claims::new(),
    };

    let request = SigningRequest {
        secret: query.key,
        payload,
        options: SigningOptions::from_parts(query.algorithm, query.add_exp),
    };
    issue(&state, request).await
}

fn parse_claims(raw: &str) -> std::result::Result<Claims, TokenMintError> {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Object(claims)) => Ok(claims),
        Ok(_) => Err(TokenMintError::InvalidPayload("body must be a JSON object".into())),
        Err(e) => Err(TokenMintError::InvalidPayload(e.to_string())),
    }
}

async fn issue(state: &AppState, request: SigningRequest) -> Result<Json<GenerateTokenResponse>> {
    let issued = state.issuer.issue(request).await?;
    debug!(cached = issued.cached, "Token issued");
    Ok(Json(issued.into()))
}

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let start = START_TIME.get_or_init(Instant::now);

    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_seconds: start.elapsed().as_secs(),
        cache_backend: state.cache.backend_name().into(),
        cache_enabled: state.config.enable_cache,
    })
}
