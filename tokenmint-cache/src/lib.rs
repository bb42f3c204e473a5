//! Token cache backends for tokenmint.
//!
//! - [`MemoryCache`]: bounded in-process map, batch eviction in insertion order
//! - [`RedisStore`]: external store with server-side TTL
//! - [`SoftFailStore`]: adapter that turns remote store failures into misses and no-ops
//! - [`CacheLayer`]: owns the backend chosen at startup

mod config;
mod layer;
mod memory;
mod redis_store;
mod soft_fail;

pub use config::CacheConfig;
pub use layer::CacheLayer;
pub use memory::{CacheStats, MemoryCache};
pub use redis_store::RedisStore;
pub use soft_fail::SoftFailStore;
