use std::collections::HashSet;

use crate::filter::params::{Direction, FilterParams, OrderBy};
use crate::models::human::HumanRecord;

/// Narrow a record sequence by the parsed query parameters.
///
/// The order of operations is fixed: attribute filters first, then the
/// free-text substring match, then the stable sort, and pagination last so
/// that offset/limit apply to the fully narrowed sequence. Empty parameters
/// are no-ops; `apply(records, &FilterParams::default())` is the identity.
pub fn apply(mut records: Vec<HumanRecord>, params: &FilterParams) -> Vec<HumanRecord> {
    if !params.tags.is_empty() {
        let wanted = lowercase_set(&params.tags);
        records.retain(|r| intersects(&r.metadata.tags, &wanted));
    }

    if !params.ethnicity.is_empty() {
        let wanted = lowercase_set(&params.ethnicity);
        records.retain(|r| intersects(&r.metadata.ethnicity, &wanted));
    }

    if let Some(gender) = params.gender.as_deref() {
        records.retain(|r| r.metadata.gender.map(|g| g.as_str() == gender).unwrap_or(false));
    }

    // Once a date bound is active, records without a parseable dob cannot
    // satisfy it and drop out.
    if let Some(cutoff) = params.dob_before {
        records.retain(|r| matches!(r.metadata.dob, Some(dob) if dob <= cutoff));
    }
    if let Some(cutoff) = params.dob_after {
        records.retain(|r| matches!(r.metadata.dob, Some(dob) if dob >= cutoff));
    }

    if let Some(needle) = params
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        let needle = needle.to_lowercase();
        records.retain(|r| matches_substring(r, &needle));
    }

    if let Some(order_by) = params.order_by {
        sort_records(&mut records, order_by, params.direction);
    }

    paginate(records, params.offset, params.limit)
}

fn lowercase_set(values: &[String]) -> HashSet<String> {
    values.iter().map(|v| v.to_lowercase()).collect()
}

fn intersects(values: &[String], wanted: &HashSet<String>) -> bool {
    values.iter().any(|v| wanted.contains(&v.to_lowercase()))
}

/// The live-filter search path: case-insensitive substring over the record's
/// textual fields. The weighted index ranking is a separate code path
/// (`search::index`) and must stay that way.
fn matches_substring(record: &HumanRecord, needle: &str) -> bool {
    let meta = &record.metadata;
    meta.name.to_lowercase().contains(needle)
        || meta.aka.iter().any(|a| a.to_lowercase().contains(needle))
        || meta.tags.iter().any(|t| t.to_lowercase().contains(needle))
        || meta
            .ethnicity
            .iter()
            .any(|e| e.to_lowercase().contains(needle))
}

/// Stable sort: records with equal keys preserve their original relative
/// order.
fn sort_records(records: &mut [HumanRecord], order_by: OrderBy, direction: Direction) {
    match (order_by, direction) {
        (OrderBy::Views, Direction::Asc) => {
            records.sort_by(|a, b| a.metadata.views.cmp(&b.metadata.views));
        }
        (OrderBy::Views, Direction::Desc) => {
            records.sort_by(|a, b| b.metadata.views.cmp(&a.metadata.views));
        }
        (OrderBy::CreatedAt, Direction::Asc) => {
            records.sort_by(|a, b| a.metadata.created_at.cmp(&b.metadata.created_at));
        }
        (OrderBy::CreatedAt, Direction::Desc) => {
            records.sort_by(|a, b| b.metadata.created_at.cmp(&a.metadata.created_at));
        }
    }
}

/// Drop `offset` leading records, then truncate to `limit`. An offset past
/// the end yields an empty sequence; `limit: None` never truncates.
fn paginate(records: Vec<HumanRecord>, offset: usize, limit: Option<usize>) -> Vec<HumanRecord> {
    let mut records: Vec<HumanRecord> = records.into_iter().skip(offset).collect();
    if let Some(limit) = limit {
        records.truncate(limit);
    }
    records
}
