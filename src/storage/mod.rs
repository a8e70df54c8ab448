use crate::clock::{system_clock, Clock};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Trait for storage implementations
pub trait Storage: Send + Sync {
    /// Get data for a key
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Set data for a key
    fn set(&self, key: &str, value: &[u8]);

    /// Delete data for a key
    fn delete(&self, key: &str);

    /// Drop every stored entry
    fn clear(&self);
}

struct Entry {
    value: Vec<u8>,
    stored_at: u64,
}

/// In-memory storage implementation.
///
/// Without a TTL entries live as long as the storage. With one, an entry
/// older than the TTL is treated as missing and evicted on read.
pub struct MemoryStorage {
    data: Arc<Mutex<HashMap<String, Entry>>>,
    clock: Arc<dyn Clock>,
    ttl: Option<Duration>,
}

impl MemoryStorage {
    /// Create a new memory storage
    pub fn new() -> Box<Self> {
        Box::new(Self::new_unboxed())
    }

    /// Create a new memory storage (not boxed)
    pub fn new_unboxed() -> Self {
        Self {
            data: Arc::new(Mutex::new(HashMap::new())),
            clock: system_clock(),
            ttl: None,
        }
    }

    pub fn with_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Get the number of stored items
    pub fn size(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        // A poisoned map only means another thread panicked mid-insert; the
        // entries themselves are still whole.
        self.data.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn is_expired(&self, entry: &Entry) -> bool {
        match self.ttl {
            Some(ttl) => {
                self.clock.now_millis().saturating_sub(entry.stored_at) >= ttl.as_millis() as u64
            }
            None => false,
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new_unboxed()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        let mut data = self.lock();
        let expired = match data.get(key) {
            Some(entry) if !self.is_expired(entry) => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            data.remove(key);
        }
        None
    }

    fn set(&self, key: &str, value: &[u8]) {
        let entry = Entry {
            value: value.to_vec(),
            stored_at: self.clock.now_millis(),
        };
        self.lock().insert(key.to_string(), entry);
    }

    fn delete(&self, key: &str) {
        self.lock().remove(key);
    }

    fn clear(&self) {
        self.lock().clear();
    }
}
