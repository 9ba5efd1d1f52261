use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use stockdesk::cache::{CacheConfig, DatasetCache};
use stockdesk::dataset::DatasetKind;
use stockdesk::errors::ConsoleError;
use stockdesk::query::{Order, QuerySpec, SortSpec};
use stockdesk::record::{MovementDto, Row, project_all};
use stockdesk::source::{BulkFetch, ClientSource, DataSource};

struct CountingFetcher {
    calls: AtomicUsize,
}

impl CountingFetcher {
    fn new() -> Self {
        Self { calls: AtomicUsize::new(0) }
    }

    fn rows() -> Vec<Row> {
        let dtos: Vec<MovementDto> = (1..=5)
            .map(|id| MovementDto {
                id,
                movement_date: Some(format!("2026-03-0{id}T08:00:00")),
                movement_type: Some("IN".into()),
                product: None,
                warehouse: None,
                quantity: Some(id as f64),
                unit_price: None,
                user: None,
                note: None,
            })
            .collect();
        project_all(&dtos)
    }
}

impl BulkFetch for CountingFetcher {
    fn fetch_all(&self, _kind: DatasetKind) -> Result<Vec<Row>, ConsoleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Self::rows())
    }
}

#[test]
fn query_changes_reuse_one_snapshot() {
    let fetcher = Arc::new(CountingFetcher::new());
    let client = ClientSource::new(fetcher.clone());
    let base = QuerySpec::new(SortSpec::new("id", Order::Asc)).with_size(2);

    for page in 0..3 {
        client.page(DatasetKind::Movements, &base.clone().with_page(page)).unwrap();
    }
    client
        .page(DatasetKind::Movements, &base.clone().with_search("anything"))
        .unwrap();
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn refresh_invalidates_the_snapshot() {
    let fetcher = Arc::new(CountingFetcher::new());
    let client = ClientSource::new(fetcher.clone());
    let spec = QuerySpec::new(SortSpec::new("id", Order::Asc));

    client.page(DatasetKind::Movements, &spec).unwrap();
    client.refresh(DatasetKind::Movements);
    client.page(DatasetKind::Movements, &spec).unwrap();
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn snapshots_are_shared_not_copied() {
    let cache = DatasetCache::new(CacheConfig { capacity: 4, stale_after: Duration::from_secs(60) });
    let first = cache.get_or_fetch(DatasetKind::Movements, || Ok(CountingFetcher::rows())).unwrap();
    let second = cache.get_or_fetch(DatasetKind::Movements, || Ok(Vec::new())).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.generation_of(DatasetKind::Movements), Some(1));
}

#[test]
fn a_failed_fetch_caches_nothing() {
    let cache = DatasetCache::new(CacheConfig::default());
    let err = cache
        .get_or_fetch(DatasetKind::Movements, || Err(ConsoleError::Fetch("down".into())))
        .unwrap_err();
    assert!(matches!(err, ConsoleError::Fetch(_)));
    assert!(cache.get(DatasetKind::Movements).is_none());
    let ok = cache.get_or_fetch(DatasetKind::Movements, || Ok(CountingFetcher::rows()));
    assert!(ok.is_ok());
}
