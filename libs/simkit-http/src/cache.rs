//! TTL key-value cache for idempotent reads.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};

struct CacheEntry<T> {
    value: T,
    stored_at: Instant,
    ttl: Duration,
}

impl<T> CacheEntry<T> {
    fn is_live(&self) -> bool {
        self.stored_at.elapsed() < self.ttl
    }
}

/// Key-value store with per-entry expiry.
///
/// The liveness check happens under the same lock as the read, so an expired
/// entry can never be observed. There is no background sweep: expired entries
/// are evicted lazily on the next access and may otherwise linger until
/// overwritten or invalidated, which is harmless since reads always re-check.
pub struct CacheStore<T> {
    entries: Mutex<HashMap<String, CacheEntry<T>>>,
}

impl<T: Clone> CacheStore<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch a live entry, lazily evicting it when expired.
    pub fn get(&self, key: &str) -> Option<T> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.is_live() => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn set(&self, key: &str, value: T, ttl: Duration) {
        self.entries.lock().insert(
            key.to_owned(),
            CacheEntry {
                value,
                stored_at: Instant::now(),
                ttl,
            },
        );
    }

    pub fn invalidate(&self, key: &str) {
        self.entries.lock().remove(key);
    }

    pub fn invalidate_all(&self) {
        self.entries.lock().clear();
    }

    /// Number of stored entries, live or not (expired-unread entries count
    /// until evicted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl<T: Clone> Default for CacheStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_live_entry_is_returned() {
        let cache = CacheStore::new();
        cache.set("k", 42, Duration::from_secs(60));
        assert_eq!(cache.get("k"), Some(42));
    }

    #[test]
    fn test_missing_key_is_absent() {
        let cache: CacheStore<i32> = CacheStore::new();
        assert_eq!(cache.get("nope"), None);
    }

    #[test]
    fn test_expired_entry_is_absent_and_evicted() {
        let cache = CacheStore::new();
        cache.set("k", 42, Duration::ZERO);
        assert_eq!(cache.get("k"), None);
        assert!(cache.is_empty(), "expired entry should be lazily evicted");
    }

    #[test]
    fn test_expired_unread_entry_lingers_until_touched() {
        let cache = CacheStore::new();
        cache.set("stale", 1, Duration::ZERO);
        cache.set("live", 2, Duration::from_secs(60));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("stale"), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_set_overwrites_and_refreshes() {
        let cache = CacheStore::new();
        cache.set("k", 1, Duration::ZERO);
        cache.set("k", 2, Duration::from_secs(60));
        assert_eq!(cache.get("k"), Some(2));
    }

    #[test]
    fn test_invalidate() {
        let cache = CacheStore::new();
        cache.set("a", 1, Duration::from_secs(60));
        cache.set("b", 2, Duration::from_secs(60));
        cache.invalidate("a");
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), Some(2));
        cache.invalidate_all();
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_entry_expires_after_ttl() {
        let cache = CacheStore::new();
        cache.set("k", 7, Duration::from_millis(30));
        assert_eq!(cache.get("k"), Some(7));
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(cache.get("k"), None);
    }
}
