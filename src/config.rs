use serde::Deserialize;

use crate::error::AppError;

/// Server settings, layered: built-in defaults, then an optional
/// `biograph.toml`, then `BIOGRAPH_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Socket address the server binds to.
    pub listen_addr: String,
    /// Root of the content tree; profile documents live under
    /// `<content_dir>/humans/<slug>/index.md`.
    pub content_dir: String,
    /// Path of the offline-built search index artifact.
    pub index_path: String,
    /// Glob for the tera templates.
    pub templates_glob: String,
    /// Directory served as static assets.
    pub static_dir: String,
}

impl Settings {
    pub fn load() -> Result<Self, AppError> {
        let settings = config::Config::builder()
            .set_default("listen_addr", "127.0.0.1:3000")
            .and_then(|b| b.set_default("content_dir", "content"))
            .and_then(|b| b.set_default("index_path", "search-index.json"))
            .and_then(|b| b.set_default("templates_glob", "templates/**/*.html"))
            .and_then(|b| b.set_default("static_dir", "static"))
            .map_err(|e| AppError::Internal(format!("config defaults: {e}")))?
            .add_source(config::File::with_name("biograph").required(false))
            .add_source(config::Environment::with_prefix("BIOGRAPH"))
            .build()
            .map_err(|e| AppError::Internal(format!("unable to load config: {e}")))?;

        settings
            .try_deserialize()
            .map_err(|e| AppError::Internal(format!("invalid config: {e}")))
    }
}
