//! Signing requests.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ADD_EXPIRATION, DEFAULT_ALGORITHM};
use crate::types::SecretKey;

/// Token payload: claim name to arbitrary JSON value.
pub type Claims = serde_json::Map<String, serde_json::Value>;

/// Options controlling how a token is signed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningOptions {
    /// Signing algorithm name, e.g. `HS256`.
    pub algorithm: String,
    /// Inject an `exp` claim when the payload has none.
    pub add_expiration: bool,
}

impl Default for SigningOptions {
    fn default() -> Self {
        Self {
            algorithm: DEFAULT_ALGORITHM.into(),
            add_expiration: DEFAULT_ADD_EXPIRATION,
        }
    }
}

impl SigningOptions {
    /// Builds options from optional caller input, filling defaults.
    pub fn from_parts(algorithm: Option<String>, add_expiration: Option<bool>) -> Self {
        Self {
            algorithm: algorithm.unwrap_or_else(|| DEFAULT_ALGORITHM.into()),
            add_expiration: add_expiration.unwrap_or(DEFAULT_ADD_EXPIRATION),
        }
    }
}

/// A request to sign one token.
#[derive(Clone, Debug)]
pub struct SigningRequest {
    /// Key material. Redacted in `Debug`.
    pub secret: SecretKey,
    /// Claims to sign.
    pub payload: Claims,
    /// Signing options.
    pub options: SigningOptions,
}

impl SigningRequest {
    /// Creates a request with default options.
    pub fn new(secret: SecretKey, payload: Claims) -> Self {
        Self {
            secret,
            payload,
            options: SigningOptions::default(),
        }
    }

    /// Sets the signing algorithm.
    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.options.algorithm = algorithm.into();
        self
    }

    /// Sets whether `exp` is injected.
    pub fn with_add_expiration(mut self, add_expiration: bool) -> Self {
        self.options.add_expiration = add_expiration;
        self
    }

    /// Trims the algorithm name and falls back to the default when blank.
    pub fn normalize(mut self) -> Self {
        let trimmed = self.options.algorithm.trim();
        self.options.algorithm = if trimmed.is_empty() {
            DEFAULT_ALGORITHM.into()
        } else {
            trimmed.to_owned()
        };
        self
    }
}
