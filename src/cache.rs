//! Caller-side dataset cache.
//!
//! One bulk fetch per dataset feeds many query evaluations; this cache
//! holds that snapshot until it goes stale or is invalidated after a
//! mutation. Snapshots are `Arc`-shared and never mutated, so an
//! evaluation keeps the generation it started with even while a refresh
//! replaces the cached one (last-snapshot-wins).

use crate::dataset::DatasetKind;
use crate::errors::ConsoleError;
use crate::record::Row;
use lru::LruCache;
use parking_lot::RwLock;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    pub capacity: usize,
    pub stale_after: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { capacity: 8, stale_after: Duration::from_secs(60) }
    }
}

#[derive(Clone)]
struct Snapshot {
    rows: Arc<Vec<Row>>,
    generation: u64,
    fetched_at: Instant,
}

pub struct DatasetCache {
    store: RwLock<LruCache<DatasetKind, Snapshot>>,
    config: CacheConfig,
    generation: AtomicU64,
}

impl DatasetCache {
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        let cap = NonZeroUsize::new(config.capacity.max(1))
            .unwrap_or_else(|| NonZeroUsize::new(1).expect("NonZeroUsize(1) must exist"));
        Self { store: RwLock::new(LruCache::new(cap)), config, generation: AtomicU64::new(0) }
    }

    /// A fresh snapshot, if one is cached.
    #[must_use]
    pub fn get(&self, kind: DatasetKind) -> Option<Arc<Vec<Row>>> {
        let mut store = self.store.write();
        if let Some(snap) = store.get(&kind) {
            if snap.fetched_at.elapsed() <= self.config.stale_after {
                return Some(snap.rows.clone());
            }
        } else {
            return None;
        }
        // Lazy eviction on access
        store.pop(&kind);
        None
    }

    /// Return the cached snapshot or fetch, project, and cache a new one.
    ///
    /// # Errors
    /// Propagates the fetch error; nothing is cached on failure.
    pub fn get_or_fetch(
        &self,
        kind: DatasetKind,
        fetch: impl FnOnce() -> Result<Vec<Row>, ConsoleError>,
    ) -> Result<Arc<Vec<Row>>, ConsoleError> {
        if let Some(rows) = self.get(kind) {
            return Ok(rows);
        }
        let rows = Arc::new(fetch()?);
        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        log::debug!("cache: {kind} generation={generation} rows={}", rows.len());
        self.store
            .write()
            .put(kind, Snapshot { rows: rows.clone(), generation, fetched_at: Instant::now() });
        Ok(rows)
    }

    #[must_use]
    pub fn generation_of(&self, kind: DatasetKind) -> Option<u64> {
        self.store.write().get(&kind).map(|s| s.generation)
    }

    pub fn invalidate(&self, kind: DatasetKind) {
        self.store.write().pop(&kind);
    }

    pub fn clear(&self) {
        self.store.write().clear();
    }
}

impl Default for DatasetCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: i64) -> Vec<Row> {
        (1..=n).map(Row::new).collect()
    }

    #[test]
    fn second_read_hits_the_snapshot() {
        let cache = DatasetCache::default();
        let mut fetches = 0;
        for _ in 0..3 {
            let snap = cache
                .get_or_fetch(DatasetKind::Products, || {
                    fetches += 1;
                    Ok(rows(4))
                })
                .unwrap();
            assert_eq!(snap.len(), 4);
        }
        assert_eq!(fetches, 1);
        assert_eq!(cache.generation_of(DatasetKind::Products), Some(1));
    }

    #[test]
    fn invalidate_forces_a_new_generation() {
        let cache = DatasetCache::default();
        cache.get_or_fetch(DatasetKind::Users, || Ok(rows(1))).unwrap();
        cache.invalidate(DatasetKind::Users);
        cache.get_or_fetch(DatasetKind::Users, || Ok(rows(2))).unwrap();
        assert_eq!(cache.generation_of(DatasetKind::Users), Some(2));
    }

    #[test]
    fn stale_snapshot_is_refetched() {
        let cache =
            DatasetCache::new(CacheConfig { capacity: 4, stale_after: Duration::from_millis(0) });
        cache.get_or_fetch(DatasetKind::Stocks, || Ok(rows(1))).unwrap();
        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.get(DatasetKind::Stocks).is_none());
        cache.get_or_fetch(DatasetKind::Stocks, || Ok(rows(3))).unwrap();
        assert_eq!(cache.generation_of(DatasetKind::Stocks), Some(2));
    }
}
