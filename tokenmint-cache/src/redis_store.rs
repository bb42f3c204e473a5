//! Redis-backed remote store.
//!
//! TTL is enforced by Redis (`SET .. EX`). Every command runs under a
//! timeout so a hung server shows up as an error instead of a stalled request.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, RedisError};
use tracing::{debug, instrument};

use tokenmint_core::error::{Result, TokenMintError};
use tokenmint_core::traits::RemoteStore;

/// Remote store on a Redis server.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
    timeout: Duration,
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The connection string may carry credentials
        f.debug_struct("RedisStore")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

fn unavailable(err: RedisError) -> TokenMintError {
    TokenMintError::CacheUnavailable(err.to_string())
}

impl RedisStore {
    /// Opens a managed connection.
    ///
    /// # Errors
    /// `ConfigError` for a malformed URL, `CacheUnavailable` or `CacheTimeout`
    /// when the server cannot be reached.
    #[instrument(skip_all)]
    pub async fn connect(url: &str, timeout: Duration) -> Result<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| TokenMintError::ConfigError(format!("invalid redis url: {}", e)))?;

        let conn = with_timeout("connect", timeout, client.get_connection_manager()).await?;
        debug!("Redis connection established");

        Ok(Self { conn, timeout })
    }
}

async fn with_timeout<T, F>(operation: &'static str, timeout: Duration, fut: F) -> Result<T>
where
    F: Future<Output = std::result::Result<T, RedisError>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result.map_err(unavailable),
        Err(_) => Err(TokenMintError::CacheTimeout {
            operation,
            millis: timeout.as_millis() as u64,
        }),
    }
}

#[async_trait]
impl RemoteStore for RedisStore {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let pong: String =
            with_timeout("ping", self.timeout, redis::cmd("PING").query_async(&mut conn)).await?;
        if pong != "PONG" {
            return Err(TokenMintError::CacheUnavailable(format!(
                "unexpected PING reply: {}",
                pong
            )));
        }
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        with_timeout("get", self.timeout, conn.get(key)).await
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let mut conn = self.conn.clone();
        // EX takes whole seconds and rejects zero
        let seconds = ttl.as_secs().max(1);
        with_timeout("set", self.timeout, conn.set_ex(key, value, seconds)).await
    }
}
