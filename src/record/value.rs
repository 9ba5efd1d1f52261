use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::cmp::Ordering;

/// A typed scalar carried by a projected row field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Num(f64),
    Time(DateTime<Utc>),
    Str(String),
}

impl FieldValue {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Text content for substring search; only string fields participate.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Canonical rendering used for exact-match filters and CSV cells.
    ///
    /// Whole numbers render without a fractional part so an identifier
    /// projected as `Num(7.0)` matches the filter value `"7"`.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Num(n) => render_num(*n),
            Self::Time(t) => t.to_rfc3339_opts(SecondsFormat::Secs, true),
            Self::Str(s) => s.clone(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        Self::Num(n)
    }
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn render_num(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Total order over field values: numeric, chronological, or lexical
/// within a type; mixed types fall back to a fixed type rank.
#[must_use]
pub fn compare_values(a: &FieldValue, b: &FieldValue) -> Ordering {
    use FieldValue as V;
    match (a, b) {
        (V::Num(x), V::Num(y)) => x.total_cmp(y),
        (V::Time(x), V::Time(y)) => x.cmp(y),
        (V::Str(x), V::Str(y)) => x.cmp(y),
        (V::Bool(x), V::Bool(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

const fn type_rank(v: &FieldValue) -> u8 {
    match v {
        FieldValue::Null => 0,
        FieldValue::Bool(_) => 1,
        FieldValue::Num(_) => 2,
        FieldValue::Time(_) => 3,
        FieldValue::Str(_) => 4,
    }
}

/// Parse a service timestamp into an absolute instant.
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM[:SS[.fff]]` (read as UTC when no
/// offset is present), and a bare date. Anything else yields `None`.
#[must_use]
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(n) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(n.and_utc());
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}
