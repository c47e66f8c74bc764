use super::schema::RawTables;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Time source for cache expiry. Injected so tests can move the clock
/// instead of sleeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct CacheEntry {
    key: String,
    tables: RawTables,
    fetched_at: Instant,
}

/// Holds the most recent successful remote fetch for a bounded window, keyed
/// by the dataset identifier. Invalidation is purely time-based; this is a
/// render-cycle optimization, not a correctness mechanism.
pub struct TableCache {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    slot: Mutex<Option<CacheEntry>>,
}

impl TableCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            slot: Mutex::new(None),
        }
    }

    /// Returns the cached tables if the key matches and the entry has not
    /// aged out. An expired entry is removed on the way through.
    pub fn get(&self, key: &str) -> Option<RawTables> {
        let mut slot = self.slot.lock().expect("cache mutex poisoned");
        let fresh = match slot.as_ref() {
            Some(entry) if entry.key == key => {
                self.clock.now().duration_since(entry.fetched_at) < self.ttl
            }
            _ => return None,
        };

        if fresh {
            slot.as_ref().map(|entry| entry.tables.clone())
        } else {
            *slot = None;
            None
        }
    }

    pub fn store(&self, key: &str, tables: RawTables) {
        let mut slot = self.slot.lock().expect("cache mutex poisoned");
        *slot = Some(CacheEntry {
            key: key.to_string(),
            tables,
            fetched_at: self.clock.now(),
        });
    }
}

impl std::fmt::Debug for TableCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableCache").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}


#[cfg(test)]
mod tests {
    use super::test_clock::ManualClock;
    use super::*;
    use crate::dataset::fallback_tables;

    #[test]
    fn returns_stored_tables_before_expiry() {
        let clock = Arc::new(ManualClock::new());
        let cache = TableCache::with_clock(Duration::from_secs(3600), clock.clone());

        cache.store("SALT-NLP/WORKBank", fallback_tables());
        clock.advance(Duration::from_secs(3599));

        let hit = cache.get("SALT-NLP/WORKBank").expect("entry still fresh");
        assert_eq!(hit.worker.len(), fallback_tables().worker.len());
    }

    #[test]
    fn expires_entries_after_ttl() {
        let clock = Arc::new(ManualClock::new());
        let cache = TableCache::with_clock(Duration::from_secs(3600), clock.clone());

        cache.store("SALT-NLP/WORKBank", fallback_tables());
        clock.advance(Duration::from_secs(3600));

        assert!(cache.get("SALT-NLP/WORKBank").is_none());
    }

    #[test]
    fn key_mismatch_is_a_miss() {
        let cache = TableCache::new(Duration::from_secs(3600));
        cache.store("SALT-NLP/WORKBank", fallback_tables());
        assert!(cache.get("other/mirror").is_none());
    }
}
