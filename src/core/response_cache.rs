use crate::clock::Clock;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// A cached value together with the time it was produced.
#[derive(Debug)]
pub struct CachedEntry<T> {
    pub data: T,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
}

/// Single-slot cache with a fixed freshness window.
///
/// The slot holds an `Arc`; storing a new value swaps the pointer under the
/// write lock, so readers always see either the old or the new entry whole.
pub struct ResponseCache<T> {
    slot: RwLock<Option<Arc<CachedEntry<T>>>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<T> ResponseCache<T> {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            slot: RwLock::new(None),
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn now_millis(&self) -> u64 {
        self.clock.now_millis()
    }

    /// The cached entry if it is younger than the TTL.
    pub fn get_fresh(&self) -> Option<Arc<CachedEntry<T>>> {
        let slot = self.slot.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        let entry = slot.as_ref()?;
        let age = self.clock.now_millis().saturating_sub(entry.timestamp);
        if age < self.ttl.as_millis() as u64 {
            Some(Arc::clone(entry))
        } else {
            None
        }
    }

    /// Replace the cached entry, stamped with the current time.
    pub fn store(&self, data: T) -> Arc<CachedEntry<T>> {
        let entry = Arc::new(CachedEntry {
            data,
            timestamp: self.clock.now_millis(),
        });
        let mut slot = self.slot.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(Arc::clone(&entry));
        entry
    }

    pub fn invalidate(&self) {
        let mut slot = self.slot.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    #[test]
    fn test_fresh_within_ttl() {
        let clock = ManualClock::new(1_000);
        let cache = ResponseCache::new(Duration::from_secs(300), Arc::new(clock.clone()));

        assert!(cache.get_fresh().is_none());

        let stored = cache.store(vec![1, 2, 3]);
        assert_eq!(stored.timestamp, 1_000);

        clock.advance(Duration::from_secs(299));
        let hit = cache.get_fresh().unwrap();
        assert_eq!(hit.data, vec![1, 2, 3]);
        assert_eq!(hit.timestamp, 1_000);
    }

    #[test]
    fn test_stale_after_ttl() {
        let clock = ManualClock::new(0);
        let cache = ResponseCache::new(Duration::from_secs(300), Arc::new(clock.clone()));

        cache.store("old");
        clock.advance(Duration::from_secs(300));
        assert!(cache.get_fresh().is_none());

        cache.store("new");
        assert_eq!(cache.get_fresh().unwrap().data, "new");
    }

    #[test]
    fn test_invalidate() {
        let cache = ResponseCache::new(Duration::from_secs(300), Arc::new(ManualClock::new(0)));
        cache.store(1u8);
        cache.invalidate();
        assert!(cache.get_fresh().is_none());
    }
}
