use std::path::Path;
use std::sync::Arc;

use axum::Router;

use biograph::config::Settings;
use biograph::content::repository::{FsHumanRepository, HumanRepository};
use biograph::search::index::{self, SearchIndex};
use biograph::state::AppState;

/// Holds the temporary content tree and provides the router for
/// integration tests.
///
/// The content directory lives for as long as this struct does; dropping
/// it removes the fixture tree.
pub struct TestEnv {
    _tmp: tempfile::TempDir,
    pub router: Router,
}

impl TestEnv {
    /// Build a content tree from `(slug, markdown)` pairs and wire up the
    /// application router exactly as the server binary does, including the
    /// search index built from the same documents.
    pub async fn with_documents(docs: &[(&str, String)]) -> Self {
        let tmp = tempfile::tempdir().expect("tempdir");
        for (slug, contents) in docs {
            let dir = tmp.path().join("humans").join(slug);
            std::fs::create_dir_all(&dir).expect("content dir");
            std::fs::write(dir.join("index.md"), contents).expect("content file");
        }

        Self::from_content_root(tmp).await
    }

    /// An environment whose content root does not exist, for error-path
    /// tests.
    pub async fn broken() -> Self {
        let tmp = tempfile::tempdir().expect("tempdir");
        // Point the repository at a directory that was never created.
        let missing = tmp.path().join("missing");
        let repo: Arc<dyn HumanRepository> = Arc::new(FsHumanRepository::new(&missing));
        let router = build_router(repo, SearchIndex::empty(), &missing);
        Self { _tmp: tmp, router }
    }

    async fn from_content_root(tmp: tempfile::TempDir) -> Self {
        let repo_impl = FsHumanRepository::new(tmp.path());

        // Build the search index the way the offline builder does: every
        // published document, body stripped to plain text.
        let mut documents = Vec::new();
        for record in repo_impl.list_all().await.expect("list_all") {
            if record.metadata.draft {
                continue;
            }
            if let Some(doc) = repo_impl
                .find_by_path(&record.path)
                .await
                .expect("find_by_path")
            {
                documents.push(doc);
            }
        }
        let search_index = SearchIndex::from_entries(index::entries_from_documents(&documents));

        let repo: Arc<dyn HumanRepository> = Arc::new(repo_impl);
        let router = build_router(repo, search_index, tmp.path());
        Self { _tmp: tmp, router }
    }

    /// Build an `axum_test::TestServer` from this environment's router.
    pub fn server(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .expect_success_by_default()
            .build(self.router.clone())
    }

    /// Build a `TestServer` that does NOT expect success by default (for
    /// error and redirect tests).
    pub fn server_permissive(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .build(self.router.clone())
    }
}

fn build_router(repo: Arc<dyn HumanRepository>, index: SearchIndex, root: &Path) -> Router {
    let settings = Settings {
        listen_addr: "127.0.0.1:0".to_string(),
        content_dir: root.display().to_string(),
        index_path: root.join("search-index.json").display().to_string(),
        templates_glob: "templates/**/*.html".to_string(),
        static_dir: "static".to_string(),
    };

    let state = AppState {
        repo,
        index: Arc::new(index),
        templates: biograph::load_templates(&settings.templates_glob).expect("templates"),
        settings,
    };

    biograph::build_router(state)
}

/// A minimal valid profile document.
pub fn human_doc(title: &str, date: &str, extra_front_matter: &str, body: &str) -> String {
    format!("---\ntitle: {title}\ndate: {date}\n{extra_front_matter}---\n\n{body}\n")
}
