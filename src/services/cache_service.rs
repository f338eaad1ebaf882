use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;

/// Source of the current time for expiry checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: DateTime<Utc>,
}

/// In-memory key/value store with per-entry expiry.
///
/// Expiry is lazy: a stale entry is removed by the `get` that finds it, there is no
/// background sweep. Reads do not extend an entry's lifetime. The map is unbounded.
///
/// Mutating methods take `&mut self`; callers sharing a cache between workers wrap
/// it in a lock, and concurrent writers to one key resolve as last writer wins.
pub struct TtlCache<V> {
    default_ttl: Duration,
    entries: HashMap<String, CacheEntry<V>>,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(default_ttl_seconds: u64) -> Self {
        Self::with_clock(default_ttl_seconds, Arc::new(SystemClock))
    }

    pub fn with_clock(default_ttl_seconds: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            default_ttl: Duration::seconds(default_ttl_seconds as i64),
            entries: HashMap::new(),
            clock,
        }
    }

    pub fn get(&mut self, key: &str) -> Option<V> {
        let entry = self.entries.get(key)?;
        if self.clock.now() > entry.expires_at {
            self.entries.remove(key);
            return None;
        }
        Some(entry.value.clone())
    }

    /// Stores `value` under `key`, replacing any previous entry. `ttl` falls back to
    /// the cache default.
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        let expires_at = self.clock.now() + ttl.unwrap_or(self.default_ttl);
        self.entries
            .insert(key.into(), CacheEntry { value, expires_at });
    }

    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    pub(crate) struct ManualClock(Mutex<DateTime<Utc>>);

    impl ManualClock {
        pub(crate) fn new() -> Arc<Self> {
            Arc::new(Self(Mutex::new(Utc::now())))
        }

        pub(crate) fn advance(&self, by: Duration) {
            *self.0.lock().unwrap() += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    #[test]
    fn get_returns_value_before_expiry() {
        let clock = ManualClock::new();
        let mut cache = TtlCache::with_clock(300, clock.clone());

        cache.set("k", 7, Some(Duration::seconds(1)));
        assert_eq!(cache.get("k"), Some(7));

        // Exactly at the expiry instant the entry is still live.
        clock.advance(Duration::seconds(1));
        assert_eq!(cache.get("k"), Some(7));
    }

    #[test]
    fn expired_entry_is_evicted_on_read() {
        let clock = ManualClock::new();
        let mut cache = TtlCache::with_clock(300, clock.clone());

        cache.set("k", "v".to_string(), Some(Duration::seconds(1)));
        clock.advance(Duration::milliseconds(1001));

        assert_eq!(cache.get("k"), None);
        assert!(cache.is_empty());
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn default_ttl_applies_when_none_given() {
        let clock = ManualClock::new();
        let mut cache = TtlCache::with_clock(300, clock.clone());

        cache.set("k", 1, None);
        clock.advance(Duration::seconds(299));
        assert_eq!(cache.get("k"), Some(1));

        clock.advance(Duration::seconds(2));
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn reads_do_not_extend_lifetime() {
        let clock = ManualClock::new();
        let mut cache = TtlCache::with_clock(10, clock.clone());

        cache.set("k", 1, None);
        clock.advance(Duration::seconds(8));
        assert_eq!(cache.get("k"), Some(1));
        clock.advance(Duration::seconds(8));
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn set_overwrites_value_and_expiry() {
        let clock = ManualClock::new();
        let mut cache = TtlCache::with_clock(10, clock.clone());

        cache.set("k", 1, Some(Duration::seconds(1)));
        cache.set("k", 2, Some(Duration::seconds(60)));
        clock.advance(Duration::seconds(30));

        assert_eq!(cache.get("k"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn delete_and_clear() {
        let mut cache = TtlCache::new(60);
        cache.set("a", 1, None);
        cache.set("b", 2, None);

        assert!(cache.delete("a"));
        assert!(!cache.delete("a"));
        assert_eq!(cache.get("a"), None);

        cache.clear();
        assert_eq!(cache.get("b"), None);
        assert!(cache.is_empty());
    }
}
