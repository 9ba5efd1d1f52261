use crate::query::types::{DateRange, Order, SortSpec};
use crate::record::{FieldValue, Row, compare_values};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A row passes an active range only through a parsed date field value;
/// missing or unparsable dates exclude the row.
pub(crate) fn in_range(row: &Row, field: &str, range: &DateRange) -> bool {
    match row.get(field) {
        Some(FieldValue::Time(t)) => range.contains(*t),
        _ => false,
    }
}

/// Exact match on the canonical text of each constrained field.
/// Empty required values impose no constraint.
pub(crate) fn matches_filters(row: &Row, filters: &BTreeMap<String, String>) -> bool {
    filters.iter().all(|(field, required)| {
        if required.is_empty() {
            return true;
        }
        row.get(field).is_some_and(|v| v.render() == *required)
    })
}

/// Case-insensitive substring match over the dataset's searchable text
/// fields. Absent or empty fields never match.
pub(crate) fn matches_search(row: &Row, fields: &[&str], needle_lower: &str) -> bool {
    fields.iter().any(|field| {
        row.text(field)
            .is_some_and(|s| !s.is_empty() && s.to_lowercase().contains(needle_lower))
    })
}

/// Comparison for the sort stage. Direction reverses the comparison
/// itself, not the sorted output, so ties keep their pre-sort order under
/// a stable sort in either direction. Rows missing the sort field compare
/// below all present values, which puts them first ascending and last
/// descending.
#[must_use]
pub fn compare_rows(a: &Row, b: &Row, sort: &SortSpec) -> Ordering {
    let ord = match (a.sort_key(&sort.field), b.sort_key(&sort.field)) {
        (Some(x), Some(y)) => compare_values(x, y),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    };
    match sort.order {
        Order::Asc => ord,
        Order::Desc => ord.reverse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::types::Order;

    fn row(id: i64, qty: Option<f64>) -> Row {
        let mut r = Row::new(id);
        r.set("quantity", qty.map_or(FieldValue::Null, FieldValue::Num));
        r
    }

    #[test]
    fn empty_filter_value_is_unconstrained() {
        let mut filters = BTreeMap::new();
        filters.insert("warehouseId".to_string(), String::new());
        assert!(matches_filters(&row(1, None), &filters));
        filters.insert("warehouseId".to_string(), "7".to_string());
        assert!(!matches_filters(&row(1, None), &filters));
    }

    #[test]
    fn missing_sort_field_sorts_below_present_values() {
        let a = row(1, None);
        let b = row(2, Some(3.0));
        let asc = SortSpec::new("quantity", Order::Asc);
        let desc = SortSpec::new("quantity", Order::Desc);
        assert_eq!(compare_rows(&a, &b, &asc), Ordering::Less);
        assert_eq!(compare_rows(&a, &b, &desc), Ordering::Greater);
    }

    #[test]
    fn search_skips_empty_fields() {
        let mut r = Row::new(1);
        r.set("note", FieldValue::Str(String::new()));
        r.set("productName", FieldValue::Str("Vida M4".into()));
        assert!(matches_search(&r, &["note", "productName"], "vida"));
        assert!(!matches_search(&r, &["note"], "vida"));
    }
}
