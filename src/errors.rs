use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("invalid query: {0}")]
    InvalidQuerySpec(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("export failed: HTTP {status}")]
    ExportFailed { status: u16 },

    #[error("unknown dataset: {0}")]
    UnknownDataset(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serde JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("config error: {0}")]
    Config(String),
}

impl From<std::io::Error> for ConsoleError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
