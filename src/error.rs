use thiserror::Error;

/// Application-wide error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// A document (or the content root itself) could not be loaded.
    ///
    /// A single malformed document is skipped with a warning and never
    /// surfaces as this variant; the whole listing failing does.
    #[error("Load error: {0}")]
    Load(String),

    /// An upstream fetch failed wholesale (index artifact, content root).
    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Helper conversion from anyhow::Error
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
