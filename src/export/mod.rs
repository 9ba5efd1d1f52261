mod options;
mod params;
mod pipeline;
mod sinks;

pub use options::{ExportFormat, ExportReport};
pub use params::{encode_query, export_path, spec_params};
pub use pipeline::{ArtifactTransport, HttpResponse, download_artifact, export_artifact, export_rows_file};
pub use sinks::{CsvSink, NdjsonSink, RowSink};
