//! Common traits for tokenmint.
//!
//! These traits are the seams between the orchestrator and its collaborators,
//! so cache backends and signers can be swapped or faked in tests.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{CacheKey, Claims, SecretKey};

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE BACKEND TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Token cache as seen by the request orchestrator.
///
/// Operations are infallible: a backend that cannot answer reports a miss
/// and a backend that cannot store silently drops the write. Signing must
/// never depend on the cache being healthy.
///
/// Implementations:
/// - In-process bounded map
/// - External store wrapped in a soft-fail adapter
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Short backend name for logs and health output.
    fn name(&self) -> &'static str;

    /// Looks up a cached token.
    async fn get(&self, key: &CacheKey) -> Option<String>;

    /// Stores a token for `ttl`.
    async fn set(&self, key: &CacheKey, token: &str, ttl: Duration);

    /// Releases any resources held by the backend.
    async fn close(&self) {}
}

// ═══════════════════════════════════════════════════════════════════════════════
// REMOTE STORE TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Network key-value store with server-side TTL.
///
/// Unlike [`CacheBackend`] every operation can fail. A remote store only
/// reaches the orchestrator through an adapter that absorbs those failures.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Short store name for logs.
    fn name(&self) -> &'static str;

    /// Liveness probe used once at startup.
    async fn ping(&self) -> Result<()>;

    /// Reads a value.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes a value that the store expires after `ttl`.
    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// TOKEN SIGNER TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Signing primitive that turns claims into a compact token.
///
/// Signing is pure computation, so the trait is synchronous.
pub trait TokenSigner: Send + Sync {
    /// Signs `claims` with `secret` using the named algorithm.
    ///
    /// # Errors
    /// Unsupported algorithms, unusable keys, and encoder failures.
    fn sign(&self, claims: &Claims, secret: &SecretKey, algorithm: &str) -> Result<String>;
}
