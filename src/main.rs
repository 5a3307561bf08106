use std::sync::Arc;

use biograph::config::Settings;
use biograph::content::repository::FsHumanRepository;
use biograph::search::index::SearchIndex;
use biograph::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "biograph=info,tower_http=info".into()),
        )
        .init();

    tracing::info!("Starting biograph server...");

    let settings = Settings::load()?;

    let repo: Arc<dyn biograph::content::repository::HumanRepository> =
        Arc::new(FsHumanRepository::new(&settings.content_dir));

    tracing::info!("Serving content from {}", settings.content_dir);

    // The search index is an offline-built artifact. A missing or stale
    // artifact degrades to an empty index rather than refusing to start;
    // listings and filters do not depend on it.
    let index = match SearchIndex::load(std::path::Path::new(&settings.index_path)) {
        Ok(index) => {
            tracing::info!(entries = index.len(), "search index loaded");
            index
        }
        Err(e) => {
            tracing::warn!("search disabled: {e}");
            SearchIndex::empty()
        }
    };

    let templates = biograph::load_templates(&settings.templates_glob)?;

    let app_state = AppState {
        repo,
        index: Arc::new(index),
        templates,
        settings: settings.clone(),
    };

    let app = biograph::build_router(app_state);

    tracing::info!("Listening on http://{}", settings.listen_addr);
    let listener = tokio::net::TcpListener::bind(&settings.listen_addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
