use crate::dataset::DatasetKind;
use crate::errors::ConsoleError;
use crate::query::{QuerySpec, ResultPage};
use crate::record::Row;
use crate::source::{DataSource, PageFetch};
use std::sync::Arc;

/// Server-paginated strategy: every query change is one endpoint call.
pub struct ServerSource {
    fetcher: Arc<dyn PageFetch>,
}

impl ServerSource {
    #[must_use]
    pub fn new(fetcher: Arc<dyn PageFetch>) -> Self {
        Self { fetcher }
    }
}

impl DataSource for ServerSource {
    fn page(&self, kind: DatasetKind, spec: &QuerySpec) -> Result<ResultPage<Row>, ConsoleError> {
        // Same boundary rule as the client strategy; a bad spec must not
        // reach the wire.
        spec.validate()?;
        self.fetcher.fetch_page(kind, spec)
    }
}
