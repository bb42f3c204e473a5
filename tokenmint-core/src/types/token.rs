//! Cache keys and issued tokens.

use serde::{Deserialize, Serialize};

/// Opaque, secret-safe fingerprint of a signing request.
///
/// Built only by the fingerprint deriver; the same logical request
/// always maps to the same key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Wraps an already derived key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A signed token and whether it was served from cache.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    /// Compact signed token.
    pub token: String,
    /// True when the token came from the cache instead of a fresh signature.
    pub cached: bool,
}

impl IssuedToken {
    /// A token that was just signed.
    pub fn fresh(token: String) -> Self {
        Self { token, cached: false }
    }

    /// A token served from the cache.
    pub fn from_cache(token: String) -> Self {
        Self { token, cached: true }
    }
}
