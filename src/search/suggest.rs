use crate::search::index::SearchIndex;
use crate::search::query::{truncate_preview, SearchHit, PREVIEW_LEN};

/// Default number of live suggestions.
pub const SUGGEST_LIMIT: usize = 5;

/// The search-as-you-type path: plain case-insensitive substring matching
/// over the entry store. Kept as a separate code path from the weighted
/// ranked query; the two must not be conflated.
pub fn suggest(index: &SearchIndex, query: &str, limit: usize) -> Vec<SearchHit> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    index
        .entries()
        .iter()
        .filter(|(_, entry)| {
            entry.title.to_lowercase().contains(&needle)
                || entry.content.to_lowercase().contains(&needle)
                || entry.tags.iter().any(|t| t.to_lowercase().contains(&needle))
                || entry
                    .ethnicity
                    .iter()
                    .any(|e| e.to_lowercase().contains(&needle))
        })
        .take(limit)
        .map(|(id, entry)| SearchHit {
            url: format!("/humans/{id}"),
            title: entry.title.clone(),
            preview: truncate_preview(&entry.content, PREVIEW_LEN),
        })
        .collect()
}
