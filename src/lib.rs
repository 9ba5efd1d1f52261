pub mod cache;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod errors;
pub mod export;
pub mod guard;
pub mod logger;
pub mod query;
pub mod record;
pub mod session;
pub mod source;
pub mod types;

mod test_support;

use crate::dataset::DatasetKind;
use crate::errors::ConsoleError;
use crate::guard::RouteGuard;
use crate::query::{QuerySpec, ResultPage};
use crate::record::Row;
use crate::session::Session;
use crate::source::DataSource;
use std::sync::Arc;

/// The assembled console data layer: one session, one data source.
///
/// The source strategy (client-resident evaluation vs. server
/// pagination) is fixed at construction; everything above this facade
/// consumes `ResultPage` and cannot tell the strategies apart.
pub struct Console {
    session: Arc<Session>,
    source: Arc<dyn DataSource>,
}

impl Console {
    #[must_use]
    pub fn new(source: Arc<dyn DataSource>, session: Arc<Session>) -> Self {
        Self { session, source }
    }

    #[must_use]
    pub fn session(&self) -> Arc<Session> {
        self.session.clone()
    }

    #[must_use]
    pub fn guard(&self) -> RouteGuard {
        RouteGuard::new(self.session.clone())
    }

    /// One page of the named dataset under the given query.
    ///
    /// # Errors
    /// Refuses with `Unauthorized` while the session holds no credential
    /// (an invalidated session stops all further fetches until
    /// re-authentication); otherwise propagates source and spec errors.
    pub fn page(&self, kind: DatasetKind, spec: &QuerySpec) -> Result<ResultPage<Row>, ConsoleError> {
        if !self.session.is_authenticated() {
            return Err(ConsoleError::Unauthorized);
        }
        self.source.page(kind, spec)
    }
}

/// Initializes the logging system.
///
/// Call once before any other console operation.
///
/// # Errors
/// Returns an error if the log configuration cannot be applied.
pub fn init() -> Result<(), ConsoleError> {
    logger::init()
}
