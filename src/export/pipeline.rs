use crate::dataset::Schema;
use crate::errors::ConsoleError;
use crate::export::options::{ExportFormat, ExportReport};
use crate::export::sinks::{CsvSink, NdjsonSink, RowSink};
use crate::record::Row;
use crate::session::Session;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// One GET against the reporting endpoint. Implementations live with the
/// transport; the pipeline only interprets the status.
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

pub trait ArtifactTransport: Send + Sync {
    /// # Errors
    /// Returns an error for transport-level failures (no response at all).
    fn get(&self, path_and_query: &str, bearer: Option<&str>) -> Result<HttpResponse, ConsoleError>;
}

/// Fetch a rendered artifact with the current credential.
///
/// # Errors
/// 401/403 invalidates the session and reports `Unauthorized`; any other
/// non-success status reports `ExportFailed` rather than a silent no-op.
pub fn download_artifact(
    transport: &dyn ArtifactTransport,
    session: &Session,
    path_and_query: &str,
) -> Result<Vec<u8>, ConsoleError> {
    let token = session.token();
    let resp = transport.get(path_and_query, token.as_deref())?;
    match resp.status {
        200..=299 => Ok(resp.body),
        401 | 403 => {
            session.invalidate();
            Err(ConsoleError::Unauthorized)
        }
        status => {
            log::error!("export: {path_and_query} failed with HTTP {status}");
            Err(ConsoleError::ExportFailed { status })
        }
    }
}

/// Download an artifact and persist it atomically under `dest`.
///
/// # Errors
/// Returns an error if the download fails or the file cannot be persisted.
pub fn export_artifact(
    transport: &dyn ArtifactTransport,
    session: &Session,
    path_and_query: &str,
    dest: impl AsRef<Path>,
) -> Result<ExportReport, ConsoleError> {
    let bytes = download_artifact(transport, session, path_and_query)?;
    log::info!("export: {} bytes -> {}", bytes.len(), dest.as_ref().display());
    persist_atomic(dest.as_ref(), &bytes)?;
    Ok(ExportReport { written: bytes.len() as u64 })
}

/// Write rows to a local file in the given sink format, atomically.
///
/// # Errors
/// Returns an error for an unsupported (remote) format or a write failure.
pub fn export_rows_file(
    rows: &[Row],
    schema: &Schema,
    format: ExportFormat,
    dest: impl AsRef<Path>,
) -> Result<ExportReport, ConsoleError> {
    if format.is_remote() {
        return Err(ConsoleError::Config(format!(
            "{} is rendered by the reporting endpoint, not locally",
            format.as_str()
        )));
    }
    let dest = dest.as_ref();
    let parent = dest.parent().unwrap_or_else(|| Path::new("."));
    if !parent.exists() {
        std::fs::create_dir_all(parent)?;
    }
    let mut tmp = NamedTempFile::new_in(parent)?;
    let written = {
        let mut sink: Box<dyn RowSink + '_> = match format {
            ExportFormat::Csv => Box::new(CsvSink::new(&mut tmp, schema.columns)?),
            ExportFormat::Ndjson => Box::new(NdjsonSink::new(&mut tmp)),
            ExportFormat::Pdf | ExportFormat::Xlsx => unreachable!(),
        };
        let mut written = 0u64;
        for row in rows {
            sink.write_row(row)?;
            written += 1;
        }
        sink.finish()?;
        written
    };
    persist_temp(tmp, dest)?;
    Ok(ExportReport { written })
}

fn persist_atomic(dest: &Path, bytes: &[u8]) -> Result<(), ConsoleError> {
    let parent = dest.parent().unwrap_or_else(|| Path::new("."));
    if !parent.exists() {
        std::fs::create_dir_all(parent)?;
    }
    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    persist_temp(tmp, dest)
}

// Persist with Windows-friendly retries.
fn persist_temp(mut tmp: NamedTempFile, dest: &Path) -> Result<(), ConsoleError> {
    let mut last_err: Option<io::Error> = None;
    for attempt in 0..5 {
        if dest.exists()
            && let Err(e) = std::fs::remove_file(dest)
        {
            last_err = Some(e);
            std::thread::sleep(std::time::Duration::from_millis(10 + attempt * 5));
            continue;
        }
        match tmp.persist(dest) {
            Ok(_) => return Ok(()),
            Err(pe) => {
                last_err = Some(pe.error);
                tmp = pe.file; // recover temp file and retry
                std::thread::sleep(std::time::Duration::from_millis(10 + attempt * 5));
            }
        }
    }
    Err(last_err.map_or_else(
        || ConsoleError::Io("failed to persist export file".into()),
        ConsoleError::from,
    ))
}
