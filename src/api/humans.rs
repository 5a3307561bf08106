use axum::extract::{RawQuery, State};
use axum::Json;
use serde::Serialize;

use crate::error::AppError;
use crate::filter::engine;
use crate::filter::params::FilterParams;
use crate::models::human::HumanRecord;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HumansResponse {
    pub data: Vec<HumanRecord>,
}

/// `GET /api/humans` — the JSON listing.
///
/// Accepts `offset`, `limit` (`-1` = no limit), and repeated `tags` /
/// `ethnicity` keys. Drafts never appear. A repository failure surfaces as
/// a 500 with a generic message.
pub async fn list_humans_handler(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<HumansResponse>, AppError> {
    let params = FilterParams::from_api_query(query.as_deref().unwrap_or(""));

    let records = state.repo.list_all().await?;
    let published: Vec<HumanRecord> = records.into_iter().filter(|r| !r.metadata.draft).collect();
    let data = engine::apply(published, &params);

    tracing::debug!(count = data.len(), "humans listed");
    Ok(Json(HumansResponse { data }))
}
