use std::collections::BTreeSet;

use axum::extract::{Path, RawQuery, State};
use axum::response::{Html, Redirect};
use chrono::Utc;
use rand::seq::IndexedRandom;

use crate::error::AppError;
use crate::filter::{age, engine};
use crate::filter::params::{FilterForm, FilterParams};
use crate::models::human::HumanRecord;
use crate::rendering::markdown;
use crate::search::query;
use crate::search::suggest::{suggest, SUGGEST_LIMIT};
use crate::state::AppState;

/// `GET /humans/` — the server-rendered listing with the full filter set.
pub async fn humans_page(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Html<String>, AppError> {
    let raw = raw.unwrap_or_default();
    let today = Utc::now().date_naive();
    let params = FilterParams::from_page_query(&raw, today)?;
    let form = FilterForm::from_query_str(&raw, today);

    let records = state.repo.list_all().await?;
    let published: Vec<HumanRecord> = records.into_iter().filter(|r| !r.metadata.draft).collect();
    let (tags, ethnicities) = vocabularies(&published);

    let humans = engine::apply(published, &params);

    let mut ctx = tera::Context::new();
    ctx.insert("count", &humans.len());
    ctx.insert("humans", &humans);
    ctx.insert("tags", &tags);
    ctx.insert("ethnicities", &ethnicities);
    ctx.insert("form", &form_context(&form));

    render(&state, "humans.html", &ctx)
}

/// `GET /humans/{id}` — a single profile, markdown rendered and sanitized.
pub async fn human_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, AppError> {
    let doc = state
        .repo
        .find_by_path(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no human at {id}")))?;

    let today = Utc::now().date_naive();
    let lifespan = doc
        .record
        .metadata
        .dob
        .map(|dob| age::lifespan_display(dob, doc.record.metadata.dod, today));

    let mut ctx = tera::Context::new();
    ctx.insert("human", &doc.record);
    ctx.insert("lifespan", &lifespan);
    ctx.insert("content", &markdown::render_markdown(&doc.body));

    render(&state, "human.html", &ctx)
}

/// `GET /humans/random` — redirect to a random published profile.
pub async fn random_human(State(state): State<AppState>) -> Result<Redirect, AppError> {
    let records = state.repo.list_all().await?;
    let published: Vec<HumanRecord> = records.into_iter().filter(|r| !r.metadata.draft).collect();

    let pick = published
        .choose(&mut rand::rng())
        .ok_or_else(|| AppError::NotFound("no published humans".into()))?;

    Ok(Redirect::to(&format!("/humans/{}", pick.path)))
}

/// `GET /search?query=` — the standalone search page over the ranked index.
pub async fn search_page(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Html<String>, AppError> {
    let query_text = single_param(raw.as_deref().unwrap_or(""), "query");
    let hits = query::search(&state.index, &query_text);

    let mut ctx = tera::Context::new();
    ctx.insert("query", &query_text);
    ctx.insert("hits", &hits);

    render(&state, "search.html", &ctx)
}

/// `GET /search/suggest?search=` — the live suggest fragment.
///
/// An empty query renders nothing at all; the widget clears rather than
/// showing stale results.
pub async fn search_suggest(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Html<String>, AppError> {
    let query_text = single_param(raw.as_deref().unwrap_or(""), "search");
    if query_text.trim().is_empty() {
        return Ok(Html(String::new()));
    }

    let hits = suggest(&state.index, &query_text, SUGGEST_LIMIT);

    let mut ctx = tera::Context::new();
    ctx.insert("hits", &hits);

    render(&state, "search-suggestions.html", &ctx)
}

/// `GET /` — the listing is the landing page.
pub async fn home() -> Redirect {
    Redirect::to("/humans/")
}

fn render(state: &AppState, template: &str, ctx: &tera::Context) -> Result<Html<String>, AppError> {
    state
        .templates
        .render(template, ctx)
        .map(Html)
        .map_err(|e| AppError::Internal(format!("unable to render {template}: {e}")))
}

/// Distinct, lowercased filter vocabularies for the form dropdowns, derived
/// from the loaded records so they cannot drift from the content.
fn vocabularies(records: &[HumanRecord]) -> (Vec<String>, Vec<String>) {
    let mut tags = BTreeSet::new();
    let mut ethnicities = BTreeSet::new();
    for record in records {
        tags.extend(record.metadata.tags.iter().map(|t| t.to_lowercase()));
        ethnicities.extend(record.metadata.ethnicity.iter().map(|e| e.to_lowercase()));
    }
    (tags.into_iter().collect(), ethnicities.into_iter().collect())
}

/// Flatten the form into plain strings so the templates never see nulls.
fn form_context(form: &FilterForm) -> serde_json::Value {
    serde_json::json!({
        "ethnicity": form.ethnicity.clone().unwrap_or_default(),
        "tag": form.tag.clone().unwrap_or_default(),
        "gender": form.gender.clone().unwrap_or_default(),
        "min_age": form.min_age.map(|n| n.to_string()).unwrap_or_default(),
        "max_age": form.max_age.map(|n| n.to_string()).unwrap_or_default(),
        "search": form.search.clone().unwrap_or_default(),
    })
}

fn single_param(query: &str, key: &str) -> String {
    crate::filter::params::parse_query_pairs(query)
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
        .unwrap_or_default()
}
