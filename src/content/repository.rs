use std::path::{Path, PathBuf};

use async_trait::async_trait;
use walkdir::WalkDir;

use crate::content::frontmatter;
use crate::error::AppError;
use crate::models::human::{HumanDocument, HumanRecord};

/// Repository trait for profile documents.
///
/// This trait allows the filter engine and handlers to be tested against an
/// in-memory fixture instead of a real content directory.
#[async_trait]
pub trait HumanRepository: Send + Sync {
    /// Enumerate all documents, metadata only. Documents with malformed
    /// front matter are skipped with a warning, never failing the batch.
    async fn list_all(&self) -> Result<Vec<HumanRecord>, AppError>;

    /// Load a single document, including its markdown body.
    async fn find_by_path(&self, slug: &str) -> Result<Option<HumanDocument>, AppError>;
}

/// Filesystem implementation over `<root>/humans/<slug>/index.md`.
pub struct FsHumanRepository {
    root: PathBuf,
}

impl FsHumanRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn humans_dir(&self) -> PathBuf {
        self.root.join("humans")
    }
}

#[async_trait]
impl HumanRepository for FsHumanRepository {
    async fn list_all(&self) -> Result<Vec<HumanRecord>, AppError> {
        let dir = self.humans_dir();
        tokio::task::spawn_blocking(move || scan_content_dir(&dir))
            .await
            .map_err(|e| AppError::Internal(format!("content scan task failed: {e}")))?
    }

    async fn find_by_path(&self, slug: &str) -> Result<Option<HumanDocument>, AppError> {
        // Slugs come straight from the URL; refuse anything that could
        // escape the content root.
        if slug.is_empty() || slug.starts_with('/') || slug.split('/').any(|seg| seg == "..") {
            return Ok(None);
        }

        let path = self.humans_dir().join(slug).join("index.md");
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::Load(format!(
                    "unable to read {}: {e}",
                    path.display()
                )))
            }
        };

        let (front_matter, body) = frontmatter::parse_document(&raw)?;
        let metadata = front_matter.into_metadata()?;

        Ok(Some(HumanDocument {
            record: HumanRecord {
                path: slug.to_string(),
                metadata,
            },
            body,
        }))
    }
}

/// Walk the content directory and build listing records.
///
/// The slug is the document's location relative to the humans directory with
/// the `/index.md` suffix stripped, so `humans/ada-lovelace/index.md` yields
/// `ada-lovelace`. Enumeration order is normalized to slug order so that
/// pagination over an unfiltered listing is deterministic.
fn scan_content_dir(dir: &Path) -> Result<Vec<HumanRecord>, AppError> {
    if !dir.is_dir() {
        return Err(AppError::Load(format!(
            "content directory {} does not exist",
            dir.display()
        )));
    }

    let mut records = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("skipping unreadable content entry: {e}");
                continue;
            }
        };
        if !entry.file_type().is_file() || entry.file_name() != "index.md" {
            continue;
        }

        let slug = match slug_for(dir, entry.path()) {
            Some(slug) => slug,
            None => continue,
        };

        let raw = match std::fs::read_to_string(entry.path()) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(%slug, "skipping unreadable document: {e}");
                continue;
            }
        };

        match frontmatter::parse_document(&raw).and_then(|(fm, _)| fm.into_metadata()) {
            Ok(metadata) => records.push(HumanRecord {
                path: slug,
                metadata,
            }),
            Err(e) => {
                tracing::warn!(%slug, "skipping malformed document: {e}");
            }
        }
    }

    records.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(records)
}

fn slug_for(dir: &Path, file: &Path) -> Option<String> {
    let relative = file.strip_prefix(dir).ok()?;
    let parent = relative.parent()?;
    let slug = parent.to_string_lossy().replace('\\', "/");
    if slug.is_empty() {
        // An index.md sitting directly in the humans directory has no slug.
        None
    } else {
        Some(slug)
    }
}
