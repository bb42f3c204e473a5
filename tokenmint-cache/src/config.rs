//! Cache configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use tokenmint_core::constants::{
    DEFAULT_CACHE_TTL_SECONDS, DEFAULT_EVICTION_BATCH, DEFAULT_MAX_ENTRIES,
    DEFAULT_STORE_TIMEOUT_MS,
};

/// Cache configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of entries in the in-process cache
    pub max_entries: usize,
    /// Entries dropped per eviction pass once the in-process cache is full
    pub eviction_batch: usize,
    /// TTL for cached tokens in seconds
    pub default_ttl_seconds: u64,
    /// External store connection string; `None` selects the in-process cache
    pub redis_url: Option<String>,
    /// Timeout for each external store operation in milliseconds
    pub store_timeout_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            eviction_batch: DEFAULT_EVICTION_BATCH,
            default_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            redis_url: None,
            store_timeout_ms: DEFAULT_STORE_TIMEOUT_MS,
        }
    }
}

impl CacheConfig {
    /// Sets the external store connection string.
    pub fn with_redis(mut self, url: impl Into<String>) -> Self {
        self.redis_url = Some(url.into());
        self
    }

    /// TTL for cached tokens.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_seconds)
    }

    /// Timeout for each external store operation.
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CacheConfig::default();
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.eviction_batch, 100);
        assert_eq!(config.ttl(), Duration::from_secs(3600));
        assert!(config.redis_url.is_none());
    }

    #[test]
    fn test_serde_round_trip() {
        let config = CacheConfig::default().with_redis("redis://127.0.0.1:6379");
        let json = serde_json::to_string(&config).unwrap();
        let parsed: CacheConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
