use crate::errors::ConsoleError;
use std::str::FromStr;

/// What an export produces. Pdf and Xlsx are rendered by the reporting
/// endpoint and downloaded as-is; Csv and Ndjson are written locally from
/// the rows at hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Ndjson,
    Pdf,
    Xlsx,
}

impl ExportFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Ndjson => "ndjson",
            Self::Pdf => "pdf",
            Self::Xlsx => "xlsx",
        }
    }

    #[must_use]
    pub const fn is_remote(self) -> bool {
        matches!(self, Self::Pdf | Self::Xlsx)
    }
}

impl FromStr for ExportFormat {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "ndjson" => Ok(Self::Ndjson),
            "pdf" => Ok(Self::Pdf),
            "xlsx" => Ok(Self::Xlsx),
            other => Err(ConsoleError::Config(format!("unknown export format: {other}"))),
        }
    }
}

/// Units depend on the pipeline: rows for local sinks, bytes for
/// downloaded artifacts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExportReport {
    pub written: u64,
}
