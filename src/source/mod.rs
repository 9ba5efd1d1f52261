//! Dataset sources: where rows come from.
//!
//! Two interchangeable strategies sit behind one [`DataSource`]
//! capability. [`ClientSource`] bulk-fetches a dataset once, caches the
//! snapshot, and evaluates queries locally; [`ServerSource`] forwards each
//! query to an endpoint that paginates itself. Call sites consume
//! `ResultPage` either way and cannot tell the strategies apart.

mod client;
mod file;
mod memory;
mod server;

pub use client::ClientSource;
pub use file::FileSource;
pub use memory::MemorySource;
pub use server::ServerSource;

use crate::dataset::DatasetKind;
use crate::errors::ConsoleError;
use crate::query::{QuerySpec, ResultPage};
use crate::record::Row;
use serde::Deserialize;
use std::str::FromStr;

/// Collaborator that returns a full projected collection in one call.
pub trait BulkFetch: Send + Sync {
    fn fetch_all(&self, kind: DatasetKind) -> Result<Vec<Row>, ConsoleError>;
}

/// Collaborator that paginates, filters, and sorts on the server.
pub trait PageFetch: Send + Sync {
    fn fetch_page(&self, kind: DatasetKind, spec: &QuerySpec) -> Result<ResultPage<Row>, ConsoleError>;
}

/// The single capability the presentation layer depends on.
pub trait DataSource: Send + Sync {
    fn page(&self, kind: DatasetKind, spec: &QuerySpec) -> Result<ResultPage<Row>, ConsoleError>;
}

/// Which strategy a deployment runs; a configuration choice, not a
/// behavioral one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceMode {
    #[default]
    Client,
    Server,
}

impl FromStr for SourceMode {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "client" => Ok(Self::Client),
            "server" => Ok(Self::Server),
            other => Err(ConsoleError::Config(format!("unknown source mode: {other}"))),
        }
    }
}

/// Tolerant decode of a fetch response: some endpoints answer with a page
/// envelope, others with a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawPage<T> {
    Page(ResultPage<T>),
    List(Vec<T>),
}

impl<T> RawPage<T> {
    /// The records regardless of envelope.
    #[must_use]
    pub fn rows(self) -> Vec<T> {
        match self {
            Self::Page(page) => page.content,
            Self::List(list) => list,
        }
    }

    /// A page either way; a bare array becomes its own single page.
    #[must_use]
    pub fn into_page(self) -> ResultPage<T> {
        match self {
            Self::Page(page) => page,
            Self::List(list) => {
                let total_count = list.len();
                ResultPage { content: list, page_index: 0, page_count: 1, total_count }
            }
        }
    }
}
