//! Translation of a `QuerySpec` into transport query parameters.
//!
//! The mapping is fixed by the service: `page`, `size`,
//! `sort=field,direction`, `q` for free text, `from`/`to` for the date
//! range, and each dataset-specific filter under its own field name.

use crate::query::QuerySpec;
use chrono::SecondsFormat;

#[must_use]
pub fn spec_params(spec: &QuerySpec) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = Vec::new();
    params.push(("page".into(), spec.page.to_string()));
    params.push(("size".into(), spec.size.to_string()));
    params.push(("sort".into(), spec.sort.to_string()));
    if let Some(range) = &spec.date_range {
        if let Some(from) = range.from {
            params.push(("from".into(), from.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        if let Some(to) = range.to {
            params.push(("to".into(), to.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
    }
    for (field, value) in &spec.filters {
        if !value.is_empty() {
            params.push((field.clone(), value.clone()));
        }
    }
    if let Some(q) = spec.search.as_deref() {
        let q = q.trim();
        if !q.is_empty() {
            params.push(("q".into(), q.to_string()));
        }
    }
    params
}

#[must_use]
pub fn encode_query(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// `<path>?<query>`, omitting the `?` when nothing constrains the query.
#[must_use]
pub fn export_path(base: &str, params: &[(String, String)]) -> String {
    let qs = encode_query(params);
    if qs.is_empty() { base.to_string() } else { format!("{base}?{qs}") }
}

fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
