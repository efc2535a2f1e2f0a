//! In-memory expiring cache implementation.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use memofetch_core::constants::{DEFAULT_CACHE_CAPACITY, DEFAULT_TTL_SECONDS};
use memofetch_core::error::{FetchError, Result};

/// Cache entry: a value plus its creation time.
#[derive(Clone)]
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() > ttl
    }
}

/// Cache configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Diagnostics label, not used in cache logic
    pub name: String,
    /// Maximum number of live entries
    pub capacity: usize,
    /// Entry time-to-live in seconds
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            name: "cache".into(),
            capacity: DEFAULT_CACHE_CAPACITY,
            ttl_seconds: DEFAULT_TTL_SECONDS,
        }
    }
}

impl CacheConfig {
    /// Creates a configuration with the given label.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Bounded in-memory cache with per-store time-to-live.
///
/// Thread-safe: `get` and `put` may be called concurrently from any number
/// of callers. Entries expire `ttl` after their last `put` and are never
/// returned once stale; expiry is lazy, with stale entries dropped on the
/// read that discovers them and swept when an insert hits the capacity
/// bound. When a new key would exceed `capacity`, already-expired entries
/// are purged first, then the oldest entry by insertion time is evicted.
pub struct ExpiringCache<K, V> {
    name: String,
    capacity: usize,
    ttl: Duration,
    entries: RwLock<HashMap<K, CacheEntry<V>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K, V> ExpiringCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates a cache with the given label, capacity, and time-to-live.
    ///
    /// # Errors
    ///
    /// [`FetchError::ConfigError`] if `capacity` is zero or `ttl` is zero.
    /// Invalid configuration fails here, never at first use.
    pub fn new(name: impl Into<String>, capacity: usize, ttl: Duration) -> Result<Self> {
        let name = name.into();
        if capacity == 0 {
            return Err(FetchError::ConfigError(format!(
                "cache '{name}': capacity must be greater than zero"
            )));
        }
        if ttl.is_zero() {
            return Err(FetchError::ConfigError(format!(
                "cache '{name}': ttl must be greater than zero"
            )));
        }
        Ok(Self {
            name,
            capacity,
            ttl,
            entries: RwLock::new(HashMap::with_capacity(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        })
    }

    /// Creates a cache from a [`CacheConfig`].
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        Self::new(
            config.name,
            config.capacity,
            Duration::from_secs(config.ttl_seconds),
        )
    }

    /// Returns the cached value for a key, if present and not expired.
    ///
    /// A stale entry is a miss: it is removed so it stops counting against
    /// capacity, and `None` is returned.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        {
            let entries = self.entries.read();
            match entries.get(key) {
                Some(entry) if !entry.is_expired(self.ttl) => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return Some(entry.value.clone());
                }
                Some(_) => {
                    // Stale: fall through to remove it under the write lock.
                }
                None => {
                    self.misses.fetch_add(1, Ordering::Relaxed);
                    return None;
                }
            }
        }

        let mut entries = self.entries.write();
        // Re-check: a concurrent put may have refreshed the entry between locks.
        if let Some(entry) = entries.get(key) {
            if !entry.is_expired(self.ttl) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry.value.clone());
            }
            entries.remove(key);
            debug!(cache = %self.name, "dropped expired entry on read");
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Inserts or replaces an entry, resetting its age to zero.
    ///
    /// Replacing an existing key never evicts. Inserting a new key while the
    /// cache is full purges expired entries first and, if none were expired,
    /// evicts the oldest entry by insertion time.
    pub fn put(&self, key: K, value: V) {
        let mut entries = self.entries.write();

        if !entries.contains_key(&key) && entries.len() >= self.capacity {
            let ttl = self.ttl;
            entries.retain(|_, entry| !entry.is_expired(ttl));

            if entries.len() >= self.capacity {
                if let Some(oldest_key) = entries
                    .iter()
                    .min_by_key(|(_, entry)| entry.inserted_at)
                    .map(|(k, _)| k.clone())
                {
                    entries.remove(&oldest_key);
                    debug!(cache = %self.name, "evicted oldest entry at capacity");
                }
            }
        }

        entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Removes a single entry.
    pub fn invalidate<Q>(&self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.write().remove(key);
    }

    /// Removes all entries immediately.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Removes all expired entries.
    ///
    /// Expiry is otherwise lazy; owners that want memory reclaimed for keys
    /// that are never read again can call this on their own schedule.
    pub fn purge_expired(&self) {
        let ttl = self.ttl;
        self.entries.write().retain(|_, entry| !entry.is_expired(ttl));
    }

    /// Returns the number of entries, possibly including not-yet-purged
    /// expired ones.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the cache contains no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns the diagnostics label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.read();
        let expired = entries
            .values()
            .filter(|entry| entry.is_expired(self.ttl))
            .count();
        CacheStats {
            name: self.name.clone(),
            total_entries: entries.len(),
            expired_entries: expired,
            valid_entries: entries.len().saturating_sub(expired),
            capacity: self.capacity,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

/// Cache statistics.
#[derive(Clone, Debug)]
pub struct CacheStats {
    /// Diagnostics label of the cache instance
    pub name: String,
    /// Total entries (including expired)
    pub total_entries: usize,
    /// Expired entries awaiting removal
    pub expired_entries: usize,
    /// Valid (non-expired) entries
    pub valid_entries: usize,
    /// Maximum capacity
    pub capacity: usize,
    /// Reads answered from the cache
    pub hits: u64,
    /// Reads that found no valid entry
    pub misses: u64,
}
