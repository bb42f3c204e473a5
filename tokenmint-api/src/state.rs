//! App state: config, cache lifecycle, token issuer.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use tokenmint_cache::{CacheConfig, CacheLayer};
use tokenmint_core::constants::{
    DEFAULT_CACHE_TTL_SECONDS, DEFAULT_EVICTION_BATCH, DEFAULT_MAX_ENTRIES,
    DEFAULT_STORE_TIMEOUT_MS, DEFAULT_TOKEN_EXPIRY_SECONDS,
};
use tokenmint_crypto::JwtSigner;
use tokenmint_issuer::{IssuerConfig, TokenIssuer};

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Cache sizing and external store connection
    pub cache: CacheConfig,
    /// Lifetime of an injected `exp`, in seconds
    pub token_expiry_seconds: u64,
    /// When false every request is signed fresh
    pub enable_cache: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            token_expiry_seconds: DEFAULT_TOKEN_EXPIRY_SECONDS,
            enable_cache: true,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(variable = name, value = %raw, "Unparseable value, using default");
            default
        }),
        Err(_) => default,
    }
}

impl ApiConfig {
    /// Reads configuration from the environment, loading `.env` first.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let config = Self {
            cache: CacheConfig {
                max_entries: env_or("CACHE_MAX_ENTRIES", DEFAULT_MAX_ENTRIES),
                eviction_batch: env_or("CACHE_EVICTION_BATCH", DEFAULT_EVICTION_BATCH),
                default_ttl_seconds: env_or("CACHE_TTL_SECONDS", DEFAULT_CACHE_TTL_SECONDS),
                redis_url: std::env::var("REDIS_URL")
                    .ok()
                    .filter(|url| !url.trim().is_empty()),
                store_timeout_ms: env_or("REDIS_TIMEOUT_MS", DEFAULT_STORE_TIMEOUT_MS),
            },
            token_expiry_seconds: env_or("TOKEN_EXPIRY_SECONDS", DEFAULT_TOKEN_EXPIRY_SECONDS),
            enable_cache: std::env::var("ENABLE_CACHE")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
        };

        if config.cache.max_entries == 0 {
            tracing::warn!("CACHE_MAX_ENTRIES is 0, the in-process cache will hold nothing");
        }
        if i64::try_from(config.token_expiry_seconds).is_err() {
            tracing::warn!(
                value = config.token_expiry_seconds,
                "TOKEN_EXPIRY_SECONDS is out of range, tokens with an injected exp will fail"
            );
        }

        config
    }

    /// Overrides the external store connection string.
    pub fn with_redis_url(mut self, url: Option<String>) -> Self {
        if url.is_some() {
            self.cache.redis_url = url;
        }
        self
    }

    fn issuer_config(&self) -> IssuerConfig {
        IssuerConfig {
            cache_ttl: self.cache.ttl(),
            token_expiry: Duration::from_secs(self.token_expiry_seconds),
            caching_enabled: self.enable_cache,
        }
    }
}

/// Shared state behind every handler.
pub struct AppState {
    /// Server configuration
    pub config: ApiConfig,
    /// Cache chosen at startup
    pub cache: CacheLayer,
    /// Request orchestrator
    pub issuer: TokenIssuer,
}

impl AppState {
    /// Selects the cache backend and builds the issuer.
    pub async fn new(config: ApiConfig) -> Self {
        let cache = CacheLayer::connect(&config.cache).await;
        Self::with_cache(config, cache)
    }

    /// Builds state around an already selected cache.
    pub fn with_cache(config: ApiConfig, cache: CacheLayer) -> Self {
        let issuer = TokenIssuer::new(cache.backend(), Arc::new(JwtSigner), config.issuer_config());
        Self { config, cache, issuer }
    }
}
