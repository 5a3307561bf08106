pub mod config;
pub mod error;
pub mod state;
pub mod models {
    pub mod human;
}
pub mod content {
    pub mod frontmatter;
    pub mod repository;
}
pub mod filter {
    pub mod age;
    pub mod engine;
    pub mod params;
}
pub mod search {
    pub mod index;
    pub mod query;
    pub mod suggest;
    pub mod widget;
}
pub mod rendering {
    pub mod markdown;
}
pub mod api {
    pub mod errors;
    pub mod humans;
    pub mod pages;
}

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
///
/// Shared between the server binary and the integration tests so both
/// exercise the same routes.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/humans", get(api::humans::list_humans_handler))
        .layer(CorsLayer::permissive());

    let static_dir = state.settings.static_dir.clone();

    Router::new()
        .route("/", get(api::pages::home))
        .route("/humans", get(api::pages::humans_page))
        .route("/humans/", get(api::pages::humans_page))
        .route("/humans/random", get(api::pages::random_human))
        .route("/humans/{id}", get(api::pages::human_page))
        .route("/search", get(api::pages::search_page))
        .route("/search/suggest", get(api::pages::search_suggest))
        .merge(api)
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Load templates once at startup.
pub fn load_templates(glob: &str) -> Result<Arc<tera::Tera>, error::AppError> {
    tera::Tera::new(glob)
        .map(Arc::new)
        .map_err(|e| error::AppError::Internal(format!("unable to load templates: {e}")))
}
