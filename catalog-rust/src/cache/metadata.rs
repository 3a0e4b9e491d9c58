/// In-memory metadata cache
/// One instance per result shape (detail records, title cards).
/// Stale entries are not purged, they read as a miss and get overwritten.

use dashmap::DashMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::debug;

use super::keys::EntryKind;

pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub value: T,
    pub created_at_ms: u64,
}

impl<T> CacheEntry<T> {
    pub fn is_fresh_at(&self, now_ms: u64, ttl: Duration) -> bool {
        now_ms.saturating_sub(self.created_at_ms) < ttl.as_millis() as u64
    }
}

pub struct MetadataCache<T> {
    kind: EntryKind,
    entries: DashMap<String, CacheEntry<T>>,
}

impl<T: Clone> MetadataCache<T> {
    pub fn new(kind: EntryKind) -> Self {
        Self {
            kind,
            entries: DashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.kind.ttl()
    }

    /// Raw entry, fresh or not
    pub fn get(&self, key: &str) -> Option<CacheEntry<T>> {
        self.entries.get(key).map(|e| e.value().clone())
    }

    pub fn get_fresh(&self, key: &str) -> Option<T> {
        self.get_fresh_at(key, now_millis())
    }

    pub fn get_fresh_at(&self, key: &str, now_ms: u64) -> Option<T> {
        let entry = self.entries.get(key)?;
        if entry.is_fresh_at(now_ms, self.ttl()) {
            debug!("[CACHE] {:?} hit: {}", self.kind, key);
            Some(entry.value.clone())
        } else {
            debug!("[CACHE] {:?} stale: {}", self.kind, key);
            None
        }
    }

    pub fn put(&self, key: String, value: T) {
        self.put_at(key, value, now_millis());
    }

    /// Replaces the whole entry
    pub fn put_at(&self, key: String, value: T, now_ms: u64) {
        self.entries.insert(
            key,
            CacheEntry {
                value,
                created_at_ms: now_ms,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_until_ttl_boundary() {
        let cache: MetadataCache<String> = MetadataCache::new(EntryKind::Detail);
        let t = 1_700_000_000_000u64;
        let ttl = cache.ttl().as_millis() as u64;
        cache.put_at("detail:movie:1:ru-RU".into(), "Fight Club".into(), t);

        assert_eq!(
            cache.get_fresh_at("detail:movie:1:ru-RU", t + ttl - 1).as_deref(),
            Some("Fight Club")
        );
        assert!(cache.get_fresh_at("detail:movie:1:ru-RU", t + ttl).is_none());
    }

    #[test]
    fn stale_entry_is_kept_until_overwritten() {
        let cache: MetadataCache<u32> = MetadataCache::new(EntryKind::TitleCard);
        let t = 1_000u64;
        let ttl = cache.ttl().as_millis() as u64;
        cache.put_at("k".into(), 1, t);
        assert!(cache.get_fresh_at("k", t + ttl * 3).is_none());
        assert_eq!(cache.get("k").map(|e| e.value), Some(1));

        cache.put_at("k".into(), 2, t + ttl * 3);
        let entry = cache.get("k").expect("entry");
        assert_eq!(entry.value, 2);
        assert_eq!(entry.created_at_ms, t + ttl * 3);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn instances_are_independent() {
        let details: MetadataCache<u32> = MetadataCache::new(EntryKind::Detail);
        let cards: MetadataCache<u32> = MetadataCache::new(EntryKind::TitleCard);
        details.put("k".into(), 1);
        assert!(cards.get("k").is_none());

        let t = 0u64;
        let detail_ttl = details.ttl().as_millis() as u64;
        details.put_at("x".into(), 1, t);
        cards.put_at("x".into(), 1, t);
        assert!(details.get_fresh_at("x", t + detail_ttl).is_none());
        assert!(cards.get_fresh_at("x", t + detail_ttl).is_some());
    }
}
