use std::sync::Arc;

use crate::config::Settings;
use crate::content::repository::HumanRepository;
use crate::search::index::SearchIndex;

/// Shared application state handed to every handler.
///
/// The repository and index sit behind `Arc` so the state stays cheap to
/// clone per request; both are read-only at request time.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn HumanRepository>,
    pub index: Arc<SearchIndex>,
    pub templates: Arc<tera::Tera>,
    pub settings: Settings,
}
