//! DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use tokenmint_core::types::{Claims, IssuedToken, SecretKey, SigningOptions, SigningRequest};

/// Signing options as sent by callers. Every field may be omitted.
#[derive(Debug, Default, Deserialize)]
pub struct TokenOptionsDto {
    /// Signing algorithm, `HS256` when absent
    pub algorithm: Option<String>,
    /// Inject `exp` when the body has none, true when absent
    pub add_exp: Option<bool>,
}

/// Body of `POST /generate_jwt`.
#[derive(Debug, Deserialize)]
pub struct GenerateTokenRequest {
    /// Signing key (HMAC secret or PEM private key)
    pub key: SecretKey,
    /// Claims to sign
    #[serde(default)]
    pub body: Claims,
    /// Optional signing options; `null` is treated as absent
    #[serde(default)]
    pub options: Option<TokenOptionsDto>,
}

impl From<GenerateTokenRequest> for SigningRequest {
    fn from(req: GenerateTokenRequest) -> Self {
        let options = req.options.unwrap_or_default();
        SigningRequest {
            secret: req.key,
            payload: req.body,
            options: SigningOptions::from_parts(options.algorithm, options.add_exp),
        }
    }
}

/// Query parameters of `GET /generate_jwt`.
#[derive(Debug, Deserialize)]
pub struct GenerateTokenQuery {
    /// Signing key
    pub key: SecretKey,
    /// JSON-encoded claims object, `{}` when absent
    pub body: Option<String>,
    /// Signing algorithm
    pub algorithm: Option<String>,
    /// Inject `exp`
    pub add_exp: Option<bool>,
}

/// Response for token generation.
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateTokenResponse {
    /// Compact JWS
    pub token: String,
    /// True if served from the cache
    pub cached: bool,
}

impl From<IssuedToken> for GenerateTokenResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            token: issued.token,
            cached: issued.cached,
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status
    pub status: String,
    /// Version
    pub version: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Active cache backend name
    pub cache_backend: String,
    /// Whether results are cached at all
    pub cache_enabled: bool,
}
