use crate::dataset::Schema;
use crate::errors::ConsoleError;
use crate::query::eval::{compare_rows, in_range, matches_filters, matches_search};
use crate::query::types::{QuerySpec, ResultPage};
use crate::record::Row;

/// Evaluate one query over an in-memory snapshot.
///
/// Stages run in fixed order: date-range filter, field filters, free-text
/// search, stable sort, paginate. Equal inputs always yield an equal page,
/// and the result matches what a server-side paginated endpoint would have
/// returned for the same parameters.
///
/// Malformed values in individual rows drop those rows from the stage that
/// needed them; they never fail the call.
///
/// # Errors
/// Returns `InvalidQuerySpec` if `spec.size` is zero.
pub fn evaluate(rows: &[Row], spec: &QuerySpec, schema: &Schema) -> Result<ResultPage<Row>, ConsoleError> {
    spec.validate()?;

    let mut kept: Vec<&Row> = rows.iter().collect();

    if let Some(range) = &spec.date_range
        && !range.is_empty()
    {
        // Datasets without a designated date field keep no rows under an
        // active range; rows lacking the field are excluded the same way.
        let field = schema.date_field.unwrap_or_default();
        kept.retain(|r| in_range(r, field, range));
    }

    if !spec.filters.is_empty() {
        kept.retain(|r| matches_filters(r, &spec.filters));
    }

    if let Some(q) = spec.search.as_deref() {
        let needle = q.trim().to_lowercase();
        if !needle.is_empty() {
            kept.retain(|r| matches_search(r, schema.search_fields, &needle));
        }
    }

    // Vec::sort_by is stable, which the direction rule relies on.
    kept.sort_by(|a, b| compare_rows(a, b, &spec.sort));

    let total_count = kept.len();
    let page_count = total_count.div_ceil(spec.size).max(1);
    let page_index = spec.page.min(page_count - 1);
    let start = page_index * spec.size;
    let content: Vec<Row> = kept.iter().skip(start).take(spec.size).map(|r| (*r).clone()).collect();

    log::debug!(
        "evaluate: total={total_count} pages={page_count} page={page_index} len={}",
        content.len()
    );
    Ok(ResultPage { content, page_index, page_count, total_count })
}
