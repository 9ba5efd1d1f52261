use crate::dataset::DatasetKind;
use crate::errors::ConsoleError;
use crate::query::{DateRange, QuerySpec, SortSpec};
use crate::record::parse_instant;

/// Parse a `field=value` filter argument.
///
/// # Errors
/// Returns an error when the `=` separator is missing.
pub fn parse_filter_arg(raw: &str) -> Result<(String, String), ConsoleError> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| ConsoleError::Config(format!("filter must be field=value, got: {raw}")))
}

/// Assemble a `QuerySpec` from CLI arguments, falling back to the
/// dataset's default sort.
///
/// # Errors
/// Returns an error for an unparsable `from`/`to` argument; a bad bound
/// typed at the prompt should fail loudly, unlike a bad date inside a row.
#[allow(clippy::too_many_arguments)]
pub fn build_spec(
    kind: DatasetKind,
    search: Option<String>,
    filters: Vec<(String, String)>,
    from: Option<String>,
    to: Option<String>,
    sort: Option<String>,
    page: usize,
    size: usize,
) -> Result<QuerySpec, ConsoleError> {
    let sort = SortSpec::parse(sort.as_deref().unwrap_or(kind.schema().default_sort));
    let mut spec = QuerySpec::new(sort).with_page(page).with_size(size);
    if let Some(q) = search {
        spec.search = Some(q);
    }
    for (field, value) in filters {
        spec.filters.insert(field, value);
    }
    let from = parse_bound(from.as_deref())?;
    let to = parse_bound(to.as_deref())?;
    if from.is_some() || to.is_some() {
        spec.date_range = Some(DateRange::new(from, to));
    }
    Ok(spec)
}

fn parse_bound(raw: Option<&str>) -> Result<Option<chrono::DateTime<chrono::Utc>>, ConsoleError> {
    match raw {
        None => Ok(None),
        Some(s) => parse_instant(s)
            .map(Some)
            .ok_or_else(|| ConsoleError::Config(format!("unparsable date: {s}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_arg_splits_once() {
        assert_eq!(parse_filter_arg("warehouseId=7").unwrap(), ("warehouseId".into(), "7".into()));
        assert_eq!(parse_filter_arg("note=a=b").unwrap(), ("note".into(), "a=b".into()));
        assert!(parse_filter_arg("warehouseId").is_err());
    }

    #[test]
    fn spec_falls_back_to_the_dataset_default_sort() {
        let spec =
            build_spec(DatasetKind::Movements, None, Vec::new(), None, None, None, 0, 10).unwrap();
        assert_eq!(spec.sort.to_string(), "movementDate,desc");
    }

    #[test]
    fn bad_bound_fails_loudly() {
        let err = build_spec(
            DatasetKind::Movements,
            None,
            Vec::new(),
            Some("yesterday".into()),
            None,
            None,
            0,
            10,
        );
        assert!(err.is_err());
    }
}
