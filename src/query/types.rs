use crate::errors::ConsoleError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Anything that is not `asc` (case-insensitively) sorts descending,
    /// matching what the service accepts on the wire.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("asc") { Self::Asc } else { Self::Desc }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub order: Order,
}

impl SortSpec {
    #[must_use]
    pub fn new(field: &str, order: Order) -> Self {
        Self { field: field.to_string(), order }
    }

    /// Parse the transport form `"field,direction"`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.splitn(2, ',');
        let field = parts.next().unwrap_or_default().trim().to_string();
        let order = Order::parse(parts.next().unwrap_or_default());
        Self { field, order }
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.field, self.order.as_str())
    }
}

/// Inclusive bounds on the dataset's designated date field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    #[must_use]
    pub const fn new(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        Self { from, to }
    }

    /// The console's initial movements window: the last `days` days,
    /// day-aligned (00:00 at the start, 23:59 today).
    #[must_use]
    pub fn last_days(days: i64, now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let from = (today - Duration::days(days)).and_hms_opt(0, 0, 0).map(|n| n.and_utc());
        let to = today.and_hms_opt(23, 59, 0).map(|n| n.and_utc());
        Self { from, to }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    #[must_use]
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        if let Some(from) = self.from
            && t < from
        {
            return false;
        }
        if let Some(to) = self.to
            && t > to
        {
            return false;
        }
        true
    }
}

/// Declarative description of the desired view over one dataset.
///
/// Filter values are the raw strings the toolbar holds; an empty string
/// means "filter not set" while remaining present in the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub filters: BTreeMap<String, String>,
    #[serde(default)]
    pub date_range: Option<DateRange>,
    pub sort: SortSpec,
    pub page: usize,
    pub size: usize,
}

impl QuerySpec {
    #[must_use]
    pub fn new(sort: SortSpec) -> Self {
        Self {
            search: None,
            filters: BTreeMap::new(),
            date_range: None,
            sort,
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }

    #[must_use]
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    #[must_use]
    pub fn with_filter(mut self, field: &str, value: &str) -> Self {
        self.filters.insert(field.to_string(), value.to_string());
        self
    }

    #[must_use]
    pub fn with_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    #[must_use]
    pub const fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    #[must_use]
    pub const fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// A zero page size would make page arithmetic meaningless; reject it
    /// loudly instead of coercing, since it can only be a caller bug.
    pub fn validate(&self) -> Result<(), ConsoleError> {
        if self.size == 0 {
            return Err(ConsoleError::InvalidQuerySpec("size must be >= 1".into()));
        }
        Ok(())
    }
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self::new(SortSpec::new("id", Order::Desc))
    }
}

/// One page of results plus the metadata pager controls need.
///
/// Serde names mirror the service's page envelope (`number`,
/// `totalPages`, `totalElements`), so a server-paginated response
/// deserializes directly into this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPage<T> {
    pub content: Vec<T>,
    #[serde(rename = "number")]
    pub page_index: usize,
    #[serde(rename = "totalPages")]
    pub page_count: usize,
    #[serde(rename = "totalElements")]
    pub total_count: usize,
}

impl<T> ResultPage<T> {
    #[must_use]
    pub const fn empty() -> Self {
        Self { content: Vec::new(), page_index: 0, page_count: 1, total_count: 0 }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> ResultPage<U> {
        ResultPage {
            content: self.content.into_iter().map(f).collect(),
            page_index: self.page_index,
            page_count: self.page_count,
            total_count: self.total_count,
        }
    }
}
