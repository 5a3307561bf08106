use serde::Serialize;

use crate::search::index::{ScoredId, SearchIndex};

/// Preview length for result snippets, in characters.
pub const PREVIEW_LEN: usize = 150;

/// A search result resolved into display form.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchHit {
    pub url: String,
    pub title: String,
    pub preview: String,
}

/// Run a ranked query and resolve the hits for display.
pub fn search(index: &SearchIndex, query: &str) -> Vec<SearchHit> {
    resolve_hits(index, &index.query(query))
}

/// Resolve ranked identifiers back to display records.
///
/// The index and the store must stay in sync, but a stale artifact must not
/// fail the query: identifiers with no backing entry are skipped.
pub fn resolve_hits(index: &SearchIndex, ranked: &[ScoredId]) -> Vec<SearchHit> {
    ranked
        .iter()
        .filter_map(|hit| {
            index.entry(&hit.id).map(|entry| SearchHit {
                url: format!("/humans/{}", hit.id),
                title: entry.title.clone(),
                preview: truncate_preview(&entry.content, PREVIEW_LEN),
            })
        })
        .collect()
}

/// Truncate a snippet to `n` characters, ellipsizing longer text.
pub fn truncate_preview(text: &str, n: usize) -> String {
    if text.chars().count() > n {
        let mut out: String = text.chars().take(n.saturating_sub(1)).collect();
        out.push_str("...");
        out
    } else {
        text.to_string()
    }
}
