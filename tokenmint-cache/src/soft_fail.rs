//! Soft-fail adapter for remote stores.
//!
//! This is the only place remote store errors are absorbed: a failed read
//! becomes a miss, a failed write becomes a no-op, and both are logged.

use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use tokenmint_core::traits::{CacheBackend, RemoteStore};
use tokenmint_core::types::CacheKey;

/// Exposes a [`RemoteStore`] as an infallible [`CacheBackend`].
pub struct SoftFailStore<S> {
    store: S,
}

impl<S: RemoteStore> SoftFailStore<S> {
    /// Wraps a remote store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the wrapped store.
    pub fn inner(&self) -> &S {
        &self.store
    }
}

#[async_trait]
impl<S: RemoteStore> CacheBackend for SoftFailStore<S> {
    fn name(&self) -> &'static str {
        self.store.name()
    }

    async fn get(&self, key: &CacheKey) -> Option<String> {
        match self.store.get(key.as_str()).await {
            Ok(value) => value,
            Err(e) => {
                warn!(backend = self.store.name(), error = %e, "Cache read failed, treating as miss");
                None
            }
        }
    }

    async fn set(&self, key: &CacheKey, token: &str, ttl: Duration) {
        if let Err(e) = self.store.set_ex(key.as_str(), token, ttl).await {
            warn!(backend = self.store.name(), error = %e, "Cache write failed, skipping");
        }
    }
}
