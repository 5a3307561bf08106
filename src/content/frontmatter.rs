use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::error::AppError;
use crate::models::human::{Gender, HumanMetadata};

/// Raw front matter as it appears at the top of a content document.
///
/// Field names follow the content files, not Rust conventions. Sequence
/// fields are optional at this layer because YAML authors leave them as
/// `tags:` (null); [`FrontMatter::into_metadata`] normalizes null to empty
/// so downstream code always sees a sequence.
#[derive(Debug, Deserialize)]
pub struct FrontMatter {
    pub title: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub aka: Option<Vec<String>>,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub dod: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub ethnicity: Option<Vec<String>>,
    #[serde(default, rename = "birthLocation")]
    pub birth_location: Option<String>,
    #[serde(default)]
    pub location: Option<Vec<String>>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub views: Option<u64>,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub ai_generated: bool,
}

/// Split a raw document into its front matter YAML and markdown body.
///
/// The document must start with a `---` fence and contain a closing fence.
fn split_front_matter(raw: &str) -> Option<(&str, &str)> {
    let rest = raw.strip_prefix("---")?;
    let rest = rest.strip_prefix('\n').or_else(|| rest.strip_prefix("\r\n"))?;
    let end = rest.find("\n---")?;
    let yaml = &rest[..end];
    let body = rest[end + 4..].trim_start_matches(['\r', '\n']);
    Some((yaml, body))
}

/// Parse a raw content document into front matter and body.
pub fn parse_document(raw: &str) -> Result<(FrontMatter, String), AppError> {
    let (yaml, body) = split_front_matter(raw)
        .ok_or_else(|| AppError::Load("document has no front matter fence".into()))?;

    let front_matter: FrontMatter = serde_yaml::from_str(yaml)
        .map_err(|e| AppError::Load(format!("invalid front matter: {e}")))?;

    Ok((front_matter, body.to_string()))
}

impl FrontMatter {
    /// Convert raw front matter into validated metadata.
    ///
    /// Fails only when the document is unusable as a listing entry (no
    /// parseable creation date). Optional attributes degrade to `None`
    /// individually: an unparseable `dob` must not take the whole document
    /// out of the listing, only out of date-bounded filters.
    pub fn into_metadata(self) -> Result<HumanMetadata, AppError> {
        let created_at = self
            .date
            .as_deref()
            .and_then(parse_timestamp)
            .ok_or_else(|| AppError::Load("missing or unparseable `date` field".into()))?;

        Ok(HumanMetadata {
            name: self.title,
            dob: self.dob.as_deref().and_then(parse_partial_date),
            dod: self.dod.as_deref().and_then(parse_partial_date),
            tags: self.tags.unwrap_or_default(),
            ethnicity: self.ethnicity.unwrap_or_default(),
            gender: self.gender.as_deref().and_then(parse_gender),
            aka: self.aka.unwrap_or_default(),
            website: self.website,
            twitter: self.twitter,
            birth_location: self.birth_location,
            location: self.location.unwrap_or_default(),
            views: self.views.unwrap_or(0),
            created_at,
            draft: self.draft,
            ai_generated: self.ai_generated,
        })
    }
}

/// Parse a possibly-partial date: `YYYY`, `YYYY-MM`, or `YYYY-MM-DD`.
///
/// Partial dates normalize to the first of the period. Unparseable input
/// (including the `YYYY-MM-DD` placeholder some documents carry) is `None`.
pub fn parse_partial_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    match raw.len() {
        4 => {
            let year: i32 = raw.parse().ok()?;
            NaiveDate::from_ymd_opt(year, 1, 1)
        }
        7 => NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d").ok(),
        _ => NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok(),
    }
}

/// Parse the `date` front matter field.
///
/// Accepts RFC 3339, the zone-less `YYYY-MM-DDTHH:MM:SS` form the content
/// generator writes, and bare dates. Zone-less values are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    parse_partial_date(raw).map(|d| d.and_hms_opt(0, 0, 0).expect("midnight is valid").and_utc())
}

fn parse_gender(raw: &str) -> Option<Gender> {
    match raw.to_ascii_lowercase().as_str() {
        "male" => Some(Gender::Male),
        "female" => Some(Gender::Female),
        "nonbinary" => Some(Gender::NonBinary),
        _ => None,
    }
}
