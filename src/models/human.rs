use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One profile entry: structured metadata plus the unique slug it lives at.
///
/// Records are built fresh from the content store on each listing request;
/// the markdown body is only loaded for detail pages and index building.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HumanRecord {
    /// The URL-safe slug (e.g., `ada-lovelace`), derived from the storage
    /// location with the content prefix and `/index.md` suffix stripped.
    pub path: String,
    pub metadata: HumanMetadata,
}

/// Structured attributes extracted from a document's front matter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HumanMetadata {
    /// Display name (front matter `title`).
    pub name: String,
    /// Date of birth. Partial dates (`YYYY`, `YYYY-MM`) normalize to the
    /// first of the period.
    #[serde(default)]
    pub dob: Option<NaiveDate>,
    /// Date of death, if any.
    #[serde(default)]
    pub dod: Option<NaiveDate>,
    /// Categorization tags, matched case-insensitively.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Ethnicities, matched case-insensitively.
    #[serde(default)]
    pub ethnicity: Vec<String>,
    #[serde(default)]
    pub gender: Option<Gender>,
    /// Alternate names.
    #[serde(default)]
    pub aka: Vec<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub birth_location: Option<String>,
    #[serde(default)]
    pub location: Vec<String>,
    /// View counter, read from front matter. The content store is read-only
    /// at request time, so this is reporting-only.
    #[serde(default)]
    pub views: u64,
    /// Creation timestamp (front matter `date`).
    pub created_at: DateTime<Utc>,
    /// Drafts are excluded from listings, search, and the random picker.
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub ai_generated: bool,
}

/// A full document: the listing record plus its raw markdown body.
#[derive(Debug, Clone)]
pub struct HumanDocument {
    pub record: HumanRecord,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::NonBinary => "nonbinary",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_record_serialization_round_trip() {
        let record = HumanRecord {
            path: "ada-lovelace".to_string(),
            metadata: HumanMetadata {
                name: "Ada Lovelace".to_string(),
                dob: NaiveDate::from_ymd_opt(1815, 12, 10),
                dod: NaiveDate::from_ymd_opt(1852, 11, 27),
                tags: vec!["mathematician".to_string()],
                ethnicity: vec!["english".to_string()],
                gender: Some(Gender::Female),
                aka: vec![],
                website: None,
                twitter: None,
                birth_location: Some("London".to_string()),
                location: vec![],
                views: 42,
                created_at: Utc.with_ymd_and_hms(2023, 5, 1, 12, 0, 0).unwrap(),
                draft: false,
                ai_generated: false,
            },
        };

        let json = serde_json::to_string(&record).unwrap();
        let back: HumanRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.path, "ada-lovelace");
        assert_eq!(back.metadata.name, "Ada Lovelace");
        assert_eq!(back.metadata.gender, Some(Gender::Female));
        assert_eq!(back.metadata.views, 42);
    }

    #[test]
    fn test_gender_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Gender::NonBinary).unwrap(),
            "\"nonbinary\""
        );
        let parsed: Gender = serde_json::from_str("\"male\"").unwrap();
        assert_eq!(parsed, Gender::Male);
    }

    #[test]
    fn test_metadata_defaults_on_sparse_input() {
        let json = r#"{
            "name": "Grace Hopper",
            "created_at": "2024-01-01T00:00:00Z"
        }"#;

        let meta: HumanMetadata = serde_json::from_str(json).unwrap();
        assert!(meta.tags.is_empty());
        assert!(meta.ethnicity.is_empty());
        assert_eq!(meta.views, 0);
        assert!(!meta.draft);
        assert_eq!(meta.gender, None);
    }
}
