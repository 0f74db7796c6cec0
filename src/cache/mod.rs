//! In-memory TTL store
//!
//! Each key holds one value and one expiry timer. Expiry is lazy: a stale
//! entry reads as a miss and stays in the map until [`TtlStore::sweep_expired`]
//! or the next `set` for that key replaces it.
//!
//! Values are handed out by `clone`, so they should be cheap handles such as
//! `Arc<Vec<T>>`. A `set` swaps value and timer under one write lock; readers
//! observe either the old or the new pair.
//!
//! # Example
//!
//! ```rust,ignore
//! use showcase::cache::TtlStore;
//!
//! let store = TtlStore::new();
//! store.set("insights", Arc::new(vec![1, 2, 3]), Duration::from_secs(60)).await;
//! assert!(store.get(&"insights").await.is_some());
//! ```

use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::models::ContentSet;

/// Values that can report how many records they hold
pub trait CacheValue: Clone + Send + Sync {
    fn item_count(&self) -> usize;
}

impl CacheValue for ContentSet {
    fn item_count(&self) -> usize {
        self.len()
    }
}

impl<T: Send + Sync> CacheValue for Arc<Vec<T>> {
    fn item_count(&self) -> usize {
        self.len()
    }
}

/// Offset used when a deadline does not fit in an `Instant`
const FAR_FUTURE: Duration = Duration::from_secs(30 * 365 * 24 * 60 * 60);

/// `now + after`, saturating at a far-future deadline instead of overflowing
pub fn deadline_after(now: Instant, after: Duration) -> Instant {
    now.checked_add(after).unwrap_or_else(|| now + FAR_FUTURE)
}

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> Entry<V> {
    fn is_fresh(&self, now: Instant) -> bool {
        now < self.expires_at
    }

    fn remaining(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }
}

/// Per-key statistics
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryStats {
    /// Number of records in the value
    pub item_count: usize,
    /// Seconds until the entry expires
    pub remaining_ttl_secs: u64,
}

/// Store statistics
#[derive(Debug, Clone)]
pub struct CacheStats<K> {
    /// Total cache hits
    pub hits: u64,
    /// Total cache misses
    pub misses: u64,
    /// Fresh entries by key
    pub entries: HashMap<K, EntryStats>,
}

impl<K> CacheStats<K> {
    /// Calculate hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Key-value store with per-key expiry and hit/miss accounting
pub struct TtlStore<K, V> {
    entries: RwLock<HashMap<K, Entry<V>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K, V> TtlStore<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: CacheValue,
{
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Store `value` under `key`, replacing any previous value and timer
    pub async fn set(&self, key: K, value: V, ttl: Duration) {
        let entry = Entry {
            value,
            expires_at: deadline_after(Instant::now(), ttl),
        };
        self.entries.write().await.insert(key, entry);
    }

    /// Fresh value for `key`, counting a hit or a miss
    pub async fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        let value = self
            .entries
            .read()
            .await
            .get(key)
            .filter(|entry| entry.is_fresh(now))
            .map(|entry| entry.value.clone());

        let counter = if value.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);

        value
    }

    /// True iff `key` holds a fresh value; does not touch statistics
    pub async fn has(&self, key: &K) -> bool {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .get(key)
            .is_some_and(|entry| entry.is_fresh(now))
    }

    /// Time left before `key` expires, `None` if absent or expired
    pub async fn remaining_ttl(&self, key: &K) -> Option<Duration> {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .get(key)
            .filter(|entry| entry.is_fresh(now))
            .map(|entry| entry.remaining(now))
    }

    /// Drop every expired entry, returning how many were removed
    pub async fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.is_fresh(now));
        before - entries.len()
    }

    /// Number of entries held, including expired ones not yet swept
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Cumulative hit/miss counts and per-key details of fresh entries
    pub async fn stats(&self) -> CacheStats<K> {
        let now = Instant::now();
        let entries = self
            .entries
            .read()
            .await
            .iter()
            .filter(|(_, entry)| entry.is_fresh(now))
            .map(|(key, entry)| {
                (
                    key.clone(),
                    EntryStats {
                        item_count: entry.value.item_count(),
                        remaining_ttl_secs: entry.remaining(now).as_secs(),
                    },
                )
            })
            .collect();

        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries,
        }
    }
}

impl<K, V> Default for TtlStore<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: CacheValue,
{
    fn default() -> Self {
        Self::new()
    }
}
