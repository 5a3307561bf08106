use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::human::HumanDocument;
use crate::rendering::markdown;

/// One entry in the offline-built search store: the searchable fields of a
/// single document, keyed by its slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexEntry {
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub ethnicity: Vec<String>,
    /// Markdown body stripped to plain text at build time.
    pub content: String,
}

/// The serialized artifact: id → entry. A BTreeMap keeps the JSON
/// deterministic across builds.
pub type EntryStore = BTreeMap<String, IndexEntry>;

/// Relative field weights. Title and content dominate tag/ethnicity
/// matches; the exact ratios are tuning parameters, not a contract.
const TITLE_BOOST: f32 = 15.0;
const CONTENT_BOOST: f32 = 10.0;
const FIELD_BOOST: f32 = 1.0;

/// A ranked search result identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredId {
    pub id: String,
    pub score: f32,
}

/// In-memory weighted inverted index over the entry store.
///
/// The store is built offline and loaded read-only; the postings are
/// expanded here at load time. Queries are synchronous and never touch the
/// filesystem.
#[derive(Debug)]
pub struct SearchIndex {
    ids: Vec<String>,
    entries: EntryStore,
    /// token → (document ordinal, boost-weighted term frequency)
    postings: HashMap<String, Vec<(usize, f32)>>,
}

impl SearchIndex {
    pub fn empty() -> Self {
        Self::from_entries(EntryStore::new())
    }

    pub fn from_entries(entries: EntryStore) -> Self {
        let ids: Vec<String> = entries.keys().cloned().collect();
        let mut postings: HashMap<String, Vec<(usize, f32)>> = HashMap::new();

        for (ordinal, entry) in entries.values().enumerate() {
            let mut weights: HashMap<String, f32> = HashMap::new();
            accumulate(&mut weights, &entry.title, TITLE_BOOST);
            accumulate(&mut weights, &entry.content, CONTENT_BOOST);
            for tag in &entry.tags {
                accumulate(&mut weights, tag, FIELD_BOOST);
            }
            for ethnicity in &entry.ethnicity {
                accumulate(&mut weights, ethnicity, FIELD_BOOST);
            }

            for (token, weight) in weights {
                postings.entry(token).or_default().push((ordinal, weight));
            }
        }

        Self {
            ids,
            entries,
            postings,
        }
    }

    /// Load the JSON artifact produced by the index builder.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AppError::Fetch(format!("unable to read index {}: {e}", path.display())))?;
        let entries: EntryStore = serde_json::from_str(&raw)
            .map_err(|e| AppError::Fetch(format!("invalid index {}: {e}", path.display())))?;
        Ok(Self::from_entries(entries))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn entry(&self, id: &str) -> Option<&IndexEntry> {
        self.entries.get(id)
    }

    pub fn entries(&self) -> &EntryStore {
        &self.entries
    }

    /// Rank documents against a free-text query.
    ///
    /// An empty or whitespace query yields no results without consulting
    /// the postings. Per query token, a document scores its boost-weighted
    /// term frequency scaled by the token's inverse document frequency;
    /// ties break on id for determinism.
    pub fn query(&self, query: &str) -> Vec<ScoredId> {
        let tokens = tokenize(query);
        if tokens.is_empty() {
            return Vec::new();
        }

        let total_docs = self.ids.len() as f32;
        let mut scores: HashMap<usize, f32> = HashMap::new();
        for token in tokens {
            if let Some(posting) = self.postings.get(&token) {
                let idf = (1.0 + total_docs / posting.len() as f32).ln();
                for (ordinal, weight) in posting {
                    *scores.entry(*ordinal).or_insert(0.0) += weight * idf;
                }
            }
        }

        let mut ranked: Vec<ScoredId> = scores
            .into_iter()
            .map(|(ordinal, score)| ScoredId {
                id: self.ids[ordinal].clone(),
                score,
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        ranked
    }
}

fn accumulate(weights: &mut HashMap<String, f32>, text: &str, boost: f32) {
    for token in tokenize(text) {
        *weights.entry(token).or_insert(0.0) += boost;
    }
}

/// Lowercased alphanumeric runs, two characters or longer.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.len() >= 2)
        .map(str::to_string)
        .collect()
}

/// Build the entry store from full documents. Drafts never enter the
/// index; markdown bodies are stripped to plain text.
pub fn entries_from_documents<'a, I>(documents: I) -> EntryStore
where
    I: IntoIterator<Item = &'a HumanDocument>,
{
    let mut entries = EntryStore::new();
    for doc in documents {
        if doc.record.metadata.draft {
            continue;
        }
        entries.insert(
            doc.record.path.clone(),
            IndexEntry {
                title: doc.record.metadata.name.clone(),
                tags: doc.record.metadata.tags.clone(),
                ethnicity: doc.record.metadata.ethnicity.clone(),
                content: markdown::plain_text(&doc.body),
            },
        );
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, content: &str, tags: &[&str]) -> IndexEntry {
        IndexEntry {
            title: title.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ethnicity: vec![],
            content: content.to_string(),
        }
    }

    fn index() -> SearchIndex {
        let mut entries = EntryStore::new();
        entries.insert(
            "ada-lovelace".to_string(),
            entry(
                "Ada Lovelace",
                "English mathematician and writer, known for Babbage's engine.",
                &["mathematician"],
            ),
        );
        entries.insert(
            "grace-hopper".to_string(),
            entry(
                "Grace Hopper",
                "American computer scientist; mathematician by training.",
                &["programmer"],
            ),
        );
        entries.insert(
            "maya-lin".to_string(),
            entry("Maya Lin", "American designer and sculptor.", &["artist"]),
        );
        SearchIndex::from_entries(entries)
    }

    #[test]
    fn test_empty_query_yields_nothing() {
        let idx = index();
        assert!(idx.query("").is_empty());
        assert!(idx.query("   ").is_empty());
    }

    #[test]
    fn test_unknown_token_yields_nothing() {
        assert!(index().query("zzyzx").is_empty());
    }

    #[test]
    fn test_title_match_outranks_content_match() {
        // "grace" appears in one title; "mathematician" appears in two
        // contents/tags. The title hit must come first for its own name.
        let ranked = index().query("grace");
        assert_eq!(ranked[0].id, "grace-hopper");

        let ranked = index().query("ada mathematician");
        assert_eq!(ranked[0].id, "ada-lovelace");
    }

    #[test]
    fn test_multi_token_scores_accumulate() {
        let ranked = index().query("american designer");
        assert_eq!(ranked[0].id, "maya-lin");
        // grace-hopper matches only "american".
        assert!(ranked.iter().any(|hit| hit.id == "grace-hopper"));
        assert!(ranked[0].score > ranked[1].score);
    }

    #[test]
    fn test_tie_breaks_on_id() {
        let mut entries = EntryStore::new();
        entries.insert("b".to_string(), entry("same words", "", &[]));
        entries.insert("a".to_string(), entry("same words", "", &[]));
        let ranked = SearchIndex::from_entries(entries).query("same");
        assert_eq!(ranked[0].id, "a");
        assert_eq!(ranked[1].id, "b");
    }

    #[test]
    fn test_tokenize_drops_single_chars_and_punctuation() {
        assert_eq!(tokenize("A. B. DuBois-Smith 1"), vec!["dubois", "smith"]);
    }

    #[test]
    fn test_load_missing_artifact_is_fetch_error() {
        let err = SearchIndex::load(Path::new("/nonexistent/index.json")).unwrap_err();
        assert!(matches!(err, crate::error::AppError::Fetch(_)));
    }
}
