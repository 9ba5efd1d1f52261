use crate::dataset::DatasetKind;
use crate::errors::ConsoleError;
use crate::query::{QuerySpec, ResultPage, evaluate};
use crate::record::Row;
use crate::source::{BulkFetch, PageFetch};
use parking_lot::RwLock;
use std::collections::HashMap;

/// In-memory source backing tests and offline CLI runs.
///
/// It implements both fetch traits over the same data, so a client-mode
/// and a server-mode source built on it must agree page by page.
#[derive(Default)]
pub struct MemorySource {
    data: RwLock<HashMap<DatasetKind, Vec<Row>>>,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&self, kind: DatasetKind, rows: Vec<Row>) {
        self.data.write().insert(kind, rows);
    }
}

impl BulkFetch for MemorySource {
    fn fetch_all(&self, kind: DatasetKind) -> Result<Vec<Row>, ConsoleError> {
        Ok(self.data.read().get(&kind).cloned().unwrap_or_default())
    }
}

impl PageFetch for MemorySource {
    fn fetch_page(&self, kind: DatasetKind, spec: &QuerySpec) -> Result<ResultPage<Row>, ConsoleError> {
        let rows = self.fetch_all(kind)?;
        evaluate(&rows, spec, kind.schema())
    }
}
