use std::path::PathBuf;

use clap::Parser;

use biograph::content::repository::{FsHumanRepository, HumanRepository};
use biograph::search::index;

/// Build the offline search index artifact.
///
/// Walks the content tree, extracts the searchable fields of every
/// published document, and writes the JSON entry store the server loads at
/// startup. Run at deploy/build time; the server never writes the index.
#[derive(Debug, Parser)]
#[command(name = "biograph-index")]
struct Args {
    /// Content root containing `humans/<slug>/index.md`.
    #[arg(long, default_value = "content")]
    content_dir: PathBuf,

    /// Where to write the JSON artifact.
    #[arg(long, default_value = "search-index.json")]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "biograph=info".into()),
        )
        .init();

    let args = Args::parse();

    let repo = FsHumanRepository::new(&args.content_dir);
    let records = repo.list_all().await?;

    let mut documents = Vec::new();
    for record in &records {
        if record.metadata.draft {
            continue;
        }
        match repo.find_by_path(&record.path).await? {
            Some(doc) => documents.push(doc),
            None => tracing::warn!(slug = %record.path, "document vanished during indexing"),
        }
    }

    let entries = index::entries_from_documents(&documents);
    let json = serde_json::to_string_pretty(&entries)?;
    std::fs::write(&args.out, json)?;

    tracing::info!(
        entries = entries.len(),
        out = %args.out.display(),
        "search index written"
    );
    Ok(())
}
