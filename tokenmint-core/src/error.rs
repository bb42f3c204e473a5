//! Error types for tokenmint.
//!
//! Errors fall into three groups that the HTTP layer treats differently:
//! input errors are the caller's fault, signing errors are reported as
//! server failures, and cache errors are absorbed before they reach a caller.

use thiserror::Error;

/// Result type alias using `TokenMintError`.
pub type Result<T> = std::result::Result<T, TokenMintError>;

/// Main error type for all tokenmint operations.
#[derive(Debug, Error)]
pub enum TokenMintError {
    // ═══════════════════════════════════════════════════════════════════════════
    // INPUT ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Payload could not be parsed or is not a JSON object.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // SIGNING ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Algorithm name is not one the signer supports.
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Key material is unusable for the requested algorithm.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// The signing primitive rejected the claims or key.
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // CACHE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// External store could not be reached or returned an error.
    #[error("Cache store unavailable: {0}")]
    CacheUnavailable(String),

    /// External store did not answer in time.
    #[error("Cache store timeout during {operation} after {millis}ms")]
    CacheTimeout { operation: &'static str, millis: u64 },

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl TokenMintError {
    /// Returns true if the caller sent something unusable.
    pub fn is_client_error(&self) -> bool {
        matches!(self, TokenMintError::InvalidPayload(_))
    }

    /// Returns true if the failure came from the signing step.
    pub fn is_signing_error(&self) -> bool {
        matches!(
            self,
            TokenMintError::UnsupportedAlgorithm(_)
                | TokenMintError::InvalidKey(_)
                | TokenMintError::SigningFailed(_)
        )
    }

    /// Returns true if the failure came from a cache store.
    pub fn is_cache_error(&self) -> bool {
        matches!(
            self,
            TokenMintError::CacheUnavailable(_) | TokenMintError::CacheTimeout { .. }
        )
    }
}
