use crate::dataset::DatasetKind;
use crate::errors::ConsoleError;
use crate::query::{QuerySpec, ResultPage, evaluate};
use crate::record::{MovementDto, ProductDto, Row, StockDto, UserDto, project_all};
use crate::source::{BulkFetch, PageFetch, RawPage};
use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Reads dataset dumps from `<dir>/<kind>.json`.
///
/// Each file may hold either a bare JSON array of records or a page
/// envelope; both decode. Feeds the CLI and offline inspection of service
/// exports.
pub struct FileSource {
    dir: PathBuf,
}

impl FileSource {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn read<T: DeserializeOwned>(&self, kind: DatasetKind) -> Result<Vec<T>, ConsoleError> {
        let path = self.dir.join(format!("{kind}.json"));
        let body = std::fs::read_to_string(&path)
            .map_err(|e| ConsoleError::Fetch(format!("{}: {e}", path.display())))?;
        let raw: RawPage<T> = serde_json::from_str(&body)?;
        Ok(raw.rows())
    }
}

impl BulkFetch for FileSource {
    fn fetch_all(&self, kind: DatasetKind) -> Result<Vec<Row>, ConsoleError> {
        let rows = match kind {
            DatasetKind::Products => project_all(&self.read::<ProductDto>(kind)?),
            DatasetKind::Stocks => project_all(&self.read::<StockDto>(kind)?),
            DatasetKind::Movements => project_all(&self.read::<MovementDto>(kind)?),
            DatasetKind::Users => project_all(&self.read::<UserDto>(kind)?),
        };
        log::info!("file source: loaded {} {kind} records", rows.len());
        Ok(rows)
    }
}

impl PageFetch for FileSource {
    fn fetch_page(&self, kind: DatasetKind, spec: &QuerySpec) -> Result<ResultPage<Row>, ConsoleError> {
        let rows = self.fetch_all(kind)?;
        evaluate(&rows, spec, kind.schema())
    }
}
