//! Cache seam for sharing computed training-set embeddings across process
//! instances.
//!
//! The cache stores opaque byte blobs; callers own the encoding. Absence of a
//! cache degrades to per-process recomputation, never to a hard failure, so
//! every operation here is infallible from the caller's point of view.

use std::time::{Duration, Instant};

use ahash::AHashMap;
use parking_lot::RwLock;

/// Get / set-with-ttl / invalidate surface over an external key-value store.
///
/// Implementations must swallow their own transport errors (a miss is always
/// an acceptable answer). Entries set without a TTL live until explicitly
/// invalidated.
pub trait TrainingCache: Send + Sync {
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>);

    fn invalidate(&self, key: &str);

    fn invalidate_prefix(&self, prefix: &str);
}

struct CacheSlot {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl CacheSlot {
    fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }
}

/// In-process [`TrainingCache`] with TTL expiry.
///
/// The reference implementation; deployments that share a cache across
/// instances implement [`TrainingCache`] over their key-value store.
#[derive(Default)]
pub struct MemoryCache {
    slots: RwLock<AHashMap<String, CacheSlot>>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }
}

impl TrainingCache for MemoryCache {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        let slots = self.slots.read();
        match slots.get(key) {
            Some(slot) if !slot.is_expired() => Some(slot.value.clone()),
            _ => None,
        }
    }

    fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>) {
        let slot = CacheSlot {
            value,
            expires_at: ttl.map(|t| Instant::now() + t),
        };
        self.slots.write().insert(key.to_string(), slot);
    }

    fn invalidate(&self, key: &str) {
        self.slots.write().remove(key);
    }

    fn invalidate_prefix(&self, prefix: &str) {
        self.slots.write().retain(|k, _| !k.starts_with(prefix));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_roundtrip() {
        let cache = MemoryCache::new();
        cache.set("k", vec![1, 2, 3], None);
        assert_eq!(cache.get("k"), Some(vec![1, 2, 3]));
        assert_eq!(cache.get("missing"), None);
    }

    #[test]
    fn test_ttl_expiry() {
        let cache = MemoryCache::new();
        cache.set("k", vec![1], Some(Duration::from_secs(0)));
        assert_eq!(cache.get("k"), None);

        cache.set("k", vec![1], Some(Duration::from_secs(3600)));
        assert_eq!(cache.get("k"), Some(vec![1]));
    }

    #[test]
    fn test_invalidate() {
        let cache = MemoryCache::new();
        cache.set("k", vec![1], None);
        cache.invalidate("k");
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn test_invalidate_prefix() {
        let cache = MemoryCache::new();
        cache.set("training:v1", vec![1], None);
        cache.set("training:v2", vec![2], None);
        cache.set("other", vec![3], None);

        cache.invalidate_prefix("training:");
        assert_eq!(cache.get("training:v1"), None);
        assert_eq!(cache.get("training:v2"), None);
        assert_eq!(cache.get("other"), Some(vec![3]));
    }
}
