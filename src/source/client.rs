use crate::cache::{CacheConfig, DatasetCache};
use crate::dataset::DatasetKind;
use crate::errors::ConsoleError;
use crate::query::{QuerySpec, ResultPage, evaluate};
use crate::record::Row;
use crate::source::{BulkFetch, DataSource};
use std::sync::Arc;

/// Bulk-fetch-then-evaluate strategy.
///
/// The fetcher runs once per dataset generation; every query change after
/// that is answered from the cached snapshot without I/O.
pub struct ClientSource {
    fetcher: Arc<dyn BulkFetch>,
    cache: DatasetCache,
}

impl ClientSource {
    #[must_use]
    pub fn new(fetcher: Arc<dyn BulkFetch>) -> Self {
        Self::with_cache_config(fetcher, CacheConfig::default())
    }

    #[must_use]
    pub fn with_cache_config(fetcher: Arc<dyn BulkFetch>, config: CacheConfig) -> Self {
        Self { fetcher, cache: DatasetCache::new(config) }
    }

    /// Drop the cached snapshot so the next query refetches, e.g. after a
    /// mutation to the underlying dataset.
    pub fn refresh(&self, kind: DatasetKind) {
        self.cache.invalidate(kind);
    }
}

impl DataSource for ClientSource {
    fn page(&self, kind: DatasetKind, spec: &QuerySpec) -> Result<ResultPage<Row>, ConsoleError> {
        spec.validate()?;
        let rows = self.cache.get_or_fetch(kind, || self.fetcher.fetch_all(kind))?;
        evaluate(&rows, spec, kind.schema())
    }
}
