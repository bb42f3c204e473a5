//! In-process token cache.
//!
//! Bounded map from cache key to token. Eviction is by insertion order,
//! not LRU: once the map is full, expired entries are dropped first and
//! then the oldest `eviction_batch` entries go in a single pass.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;

use tokenmint_core::traits::CacheBackend;
use tokenmint_core::types::CacheKey;

use crate::config::CacheConfig;

/// Cache entry with TTL.
#[derive(Clone)]
struct CacheEntry {
    token: String,
    inserted_at: Instant,
    ttl: Duration,
    /// Insertion sequence; matches exactly one slot in `Inner::order`.
    seq: u64,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.inserted_at.elapsed() > self.ttl
    }
}

struct Inner {
    entries: HashMap<String, CacheEntry>,
    /// Insertion order. Slots whose seq no longer matches the live entry are stale.
    order: VecDeque<(u64, String)>,
    next_seq: u64,
    evictions: u64,
}

impl Inner {
    fn is_live(&self, seq: u64, key: &str) -> bool {
        self.entries.get(key).map_or(false, |e| e.seq == seq)
    }

    fn compact_order(&mut self) {
        let entries = &self.entries;
        self.order
            .retain(|(seq, key)| entries.get(key).map_or(false, |e| e.seq == *seq));
    }

    fn evict_oldest(&mut self, batch: usize) -> usize {
        let mut evicted = 0;
        while evicted < batch {
            let Some((seq, key)) = self.order.pop_front() else {
                break;
            };
            if self.is_live(seq, &key) {
                self.entries.remove(&key);
                evicted += 1;
            }
        }
        self.evictions += evicted as u64;
        evicted
    }
}

/// In-memory token cache.
///
/// Every operation takes one mutex, so concurrent eviction and insertion
/// cannot corrupt the map or the insertion order.
pub struct MemoryCache {
    inner: Mutex<Inner>,
    config: CacheConfig,
}

impl MemoryCache {
    /// Creates a new cache with default configuration.
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Creates a cache with custom configuration.
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::with_capacity(config.max_entries),
                order: VecDeque::with_capacity(config.max_entries),
                next_seq: 0,
                evictions: 0,
            }),
            config,
        }
    }

    /// Gets a cached token. Expired entries are removed and reported as a miss.
    pub fn get(&self, key: &str) -> Option<String> {
        let mut inner = self.inner.lock();
        let expired = match inner.entries.get(key) {
            Some(entry) if !entry.is_expired() => return Some(entry.token.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            inner.entries.remove(key);
        }
        None
    }

    /// Caches a token with the default TTL.
    pub fn set(&self, key: &str, token: impl Into<String>) {
        self.set_with_ttl(key, token, self.config.ttl());
    }

    /// Caches a token with a custom TTL.
    ///
    /// Overwriting a key moves it to the back of the eviction order.
    /// A cache with zero capacity stores nothing.
    pub fn set_with_ttl(&self, key: &str, token: impl Into<String>, ttl: Duration) {
        if self.config.max_entries == 0 {
            return;
        }

        let mut inner = self.inner.lock();

        if !inner.entries.contains_key(key) && inner.entries.len() >= self.config.max_entries {
            inner.entries.retain(|_, e| !e.is_expired());
            if inner.entries.len() >= self.config.max_entries {
                let evicted = inner.evict_oldest(self.config.eviction_batch.max(1));
                debug!(evicted, capacity = self.config.max_entries, "Evicted oldest cache entries");
            }
            inner.compact_order();
        }

        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.order.push_back((seq, key.to_owned()));
        inner.entries.insert(
            key.to_owned(),
            CacheEntry {
                token: token.into(),
                inserted_at: Instant::now(),
                ttl,
                seq,
            },
        );

        // Overwrites and lazy expiry leave stale slots behind
        if inner.order.len() > self.config.max_entries.saturating_mul(2) {
            inner.compact_order();
        }
    }

    /// Removes a cached entry.
    pub fn remove(&self, key: &str) {
        self.inner.lock().entries.remove(key);
    }

    /// Clears all cached entries.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.entries.clear();
        inner.order.clear();
    }

    /// Removes all expired entries.
    pub fn cleanup_expired(&self) {
        let mut inner = self.inner.lock();
        inner.entries.retain(|_, e| !e.is_expired());
        inner.compact_order();
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    /// Returns true if `key` is present and not expired.
    pub fn contains(&self, key: &str) -> bool {
        self.inner
            .lock()
            .entries
            .get(key)
            .map_or(false, |e| !e.is_expired())
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        let expired = inner.entries.values().filter(|e| e.is_expired()).count();
        CacheStats {
            total_entries: inner.entries.len(),
            expired_entries: expired,
            valid_entries: inner.entries.len().saturating_sub(expired),
            capacity: self.config.max_entries,
            evictions: inner.evictions,
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheBackend for MemoryCache {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &CacheKey) -> Option<String> {
        MemoryCache::get(self, key.as_str())
    }

    async fn set(&self, key: &CacheKey, token: &str, ttl: Duration) {
        self.set_with_ttl(key.as_str(), token, ttl);
    }

    async fn close(&self) {
        self.clear();
    }
}

/// Cache statistics.
#[derive(Clone, Debug)]
pub struct CacheStats {
    pub total_entries: usize,
    pub expired_entries: usize,
    pub valid_entries: usize,
    pub capacity: usize,
    /// Entries removed by capacity eviction since startup
    pub evictions: u64,
}
