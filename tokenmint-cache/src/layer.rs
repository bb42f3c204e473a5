//! Cache lifecycle and backend selection.
//!
//! The backend is chosen once, when the [`CacheLayer`] is built: the
//! external store if one is configured and answers a liveness probe,
//! otherwise the in-process cache. The choice never changes afterwards;
//! later store failures are absorbed per operation by [`SoftFailStore`].

use std::sync::Arc;

use tracing::{info, warn};

use tokenmint_core::traits::{CacheBackend, RemoteStore};

use crate::config::CacheConfig;
use crate::memory::MemoryCache;
use crate::redis_store::RedisStore;
use crate::soft_fail::SoftFailStore;

/// Owns the process-wide token cache from startup to shutdown.
#[derive(Clone)]
pub struct CacheLayer {
    backend: Arc<dyn CacheBackend>,
}

impl CacheLayer {
    /// Builds the cache described by `config`.
    ///
    /// Never fails: an unreachable or misconfigured external store falls
    /// back to the in-process cache.
    pub async fn connect(config: &CacheConfig) -> Self {
        let Some(url) = config.redis_url.as_deref() else {
            info!("No external cache configured, using in-process cache");
            return Self::in_memory(config);
        };

        match RedisStore::connect(url, config.store_timeout()).await {
            Ok(store) => Self::with_remote(store, config).await,
            Err(e) => {
                warn!(error = %e, "External cache unreachable, falling back to in-process cache");
                Self::in_memory(config)
            }
        }
    }

    /// Uses `store` if it answers a liveness probe, else the in-process cache.
    pub async fn with_remote<S>(store: S, config: &CacheConfig) -> Self
    where
        S: RemoteStore + 'static,
    {
        match store.ping().await {
            Ok(()) => {
                info!(backend = store.name(), "Using external cache");
                Self::from_backend(Arc::new(SoftFailStore::new(store)))
            }
            Err(e) => {
                warn!(
                    backend = store.name(),
                    error = %e,
                    "External cache failed liveness probe, falling back to in-process cache"
                );
                Self::in_memory(config)
            }
        }
    }

    /// In-process cache only.
    pub fn in_memory(config: &CacheConfig) -> Self {
        Self::from_backend(Arc::new(MemoryCache::with_config(config.clone())))
    }

    /// Wraps an already built backend.
    pub fn from_backend(backend: Arc<dyn CacheBackend>) -> Self {
        Self { backend }
    }

    /// Shared handle to the selected backend.
    pub fn backend(&self) -> Arc<dyn CacheBackend> {
        Arc::clone(&self.backend)
    }

    /// Name of the selected backend.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Releases the backend's resources.
    pub async fn shutdown(&self) {
        self.backend.close().await;
        info!(backend = self.backend.name(), "Cache shut down");
    }
}

impl std::fmt::Debug for CacheLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheLayer")
            .field("backend", &self.backend.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokenmint_core::error::{Result, TokenMintError};
    use tokenmint_core::types::CacheKey;

    struct StubStore {
        alive: bool,
    }

    #[async_trait]
    impl RemoteStore for StubStore {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn ping(&self) -> Result<()> {
            if self.alive {
                Ok(())
            } else {
                Err(TokenMintError::CacheUnavailable("connection refused".into()))
            }
        }

        async fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(Some("remote-token".into()))
        }

        async fn set_ex(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_no_url_selects_memory() {
        let layer = CacheLayer::connect(&CacheConfig::default()).await;
        assert_eq!(layer.backend_name(), "memory");
    }

    #[tokio::test]
    async fn test_unreachable_redis_falls_back_to_memory() {
        let config = CacheConfig {
            store_timeout_ms: 300,
            ..CacheConfig::default().with_redis("redis://127.0.0.1:1")
        };
        let layer = CacheLayer::connect(&config).await;
        assert_eq!(layer.backend_name(), "memory");
    }

    #[tokio::test]
    async fn test_malformed_url_falls_back_to_memory() {
        let config = CacheConfig::default().with_redis("::not-a-url::");
        let layer = CacheLayer::connect(&config).await;
        assert_eq!(layer.backend_name(), "memory");
    }

    #[tokio::test]
    async fn test_live_remote_is_selected() {
        let layer = CacheLayer::with_remote(StubStore { alive: true }, &CacheConfig::default()).await;
        assert_eq!(layer.backend_name(), "stub");

        let token = layer.backend().get(&CacheKey::new("k")).await;
        assert_eq!(token.as_deref(), Some("remote-token"));
    }

    #[tokio::test]
    async fn test_dead_remote_is_not_selected() {
        let layer = CacheLayer::with_remote(StubStore { alive: false }, &CacheConfig::default()).await;
        assert_eq!(layer.backend_name(), "memory");
    }

    #[tokio::test]
    async fn test_shutdown_clears_memory_backend() {
        let layer = CacheLayer::in_memory(&CacheConfig::default());
        let key = CacheKey::new("k");
        layer.backend().set(&key, "t", Duration::from_secs(60)).await;
        assert!(layer.backend().get(&key).await.is_some());

        layer.shutdown().await;
        assert!(layer.backend().get(&key).await.is_none());
    }
}
