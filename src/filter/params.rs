use chrono::NaiveDate;

use crate::error::AppError;
use crate::filter::age;

/// Sort key for listings. Anything else on the wire is a bad request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBy {
    CreatedAt,
    Views,
}

impl OrderBy {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw {
            "created_at" => Ok(OrderBy::CreatedAt),
            "views" => Ok(OrderBy::Views),
            _ => Err(AppError::BadRequest(
                "orderBy must be one of: created_at, views".into(),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Asc,
    #[default]
    Desc,
}

impl Direction {
    /// Only an explicit `asc` flips the order; everything else is the
    /// descending default.
    pub fn parse(raw: &str) -> Self {
        if raw == "asc" {
            Direction::Asc
        } else {
            Direction::Desc
        }
    }
}

/// Parsed query parameters driving the filter engine.
///
/// Every field is optional on the wire; absent or empty parameters are
/// no-op filters, never zero-matches. `limit: None` is the "no limit"
/// sentinel and must not truncate; `order_by: None` means "leave the
/// enumeration order alone", which keeps the empty parameter set a true
/// identity.
#[derive(Debug, Clone, Default)]
pub struct FilterParams {
    pub offset: usize,
    pub limit: Option<usize>,
    pub tags: Vec<String>,
    pub ethnicity: Vec<String>,
    pub gender: Option<String>,
    pub dob_before: Option<NaiveDate>,
    pub dob_after: Option<NaiveDate>,
    pub search: Option<String>,
    pub order_by: Option<OrderBy>,
    pub direction: Direction,
}

impl FilterParams {
    /// Parse the JSON API query string: `offset`, `limit`, repeated `tags`
    /// and `ethnicity` keys. Malformed numbers fall back to the defaults
    /// rather than erroring.
    pub fn from_api_query(query: &str) -> Self {
        let mut params = FilterParams::default();
        for (key, value) in parse_query_pairs(query) {
            if value.is_empty() {
                continue;
            }
            match key.as_str() {
                "offset" => params.offset = value.parse().unwrap_or(0),
                "limit" => params.limit = parse_limit(&value),
                "tags" => params.tags.push(value),
                "ethnicity" => params.ethnicity.push(value),
                _ => {}
            }
        }
        params
    }

    /// Parse the listing page query string. In addition to the API
    /// parameters this accepts `orderBy`, `direction`, `gender`, `search`,
    /// the singular `tag` key, date-of-birth bounds as dates (`dobBefore`,
    /// `dobAfter`), and age bounds in whole years (`minAge`, `maxAge`)
    /// which are converted to cutoff dates against `today`.
    ///
    /// Malformed dates and unknown sort keys are bad requests; an empty
    /// age value is "no bound", never a parse error. The page always has a
    /// defined order: newest first unless the query says otherwise.
    pub fn from_page_query(query: &str, today: NaiveDate) -> Result<Self, AppError> {
        let mut params = FilterParams {
            order_by: Some(OrderBy::CreatedAt),
            ..Default::default()
        };
        for (key, value) in parse_query_pairs(query) {
            if value.is_empty() {
                continue;
            }
            match key.as_str() {
                "offset" => params.offset = value.parse().unwrap_or(0),
                "limit" => params.limit = parse_limit(&value),
                "tag" | "tags" => params.tags.push(value),
                "ethnicity" => params.ethnicity.push(value),
                "gender" => params.gender = Some(value),
                "search" => params.search = Some(value),
                "orderBy" => params.order_by = Some(OrderBy::parse(&value)?),
                "direction" => params.direction = Direction::parse(&value),
                "dobBefore" => params.dob_before = Some(parse_bound_date(&value)?),
                "dobAfter" => params.dob_after = Some(parse_bound_date(&value)?),
                "minAge" => {
                    if let Some(n) = parse_age(&value) {
                        params.dob_before = age::cutoff_from_age(n, today);
                    }
                }
                "maxAge" => {
                    if let Some(n) = parse_age(&value) {
                        params.dob_after = age::cutoff_from_age(n, today);
                    }
                }
                _ => {}
            }
        }
        Ok(params)
    }
}

/// Filter form state, round-trippable through the query string.
///
/// Constructing the query string from form state and re-parsing it must
/// reproduce the same state, modulo the age/date rounding inherent in the
/// year-granular cutoff.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterForm {
    pub ethnicity: Option<String>,
    pub tag: Option<String>,
    pub gender: Option<String>,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
    pub search: Option<String>,
}

impl FilterForm {
    /// Build the listing page query string. Empty fields are omitted; age
    /// fields are converted to date-of-birth cutoffs.
    pub fn to_query_string(&self, today: NaiveDate) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        if let Some(cutoff) = self.min_age.and_then(|n| age::cutoff_from_age(n, today)) {
            pairs.push(("dobBefore", cutoff.to_string()));
        }
        if let Some(cutoff) = self.max_age.and_then(|n| age::cutoff_from_age(n, today)) {
            pairs.push(("dobAfter", cutoff.to_string()));
        }
        for (key, value) in [
            ("gender", &self.gender),
            ("ethnicity", &self.ethnicity),
            ("tag", &self.tag),
            ("search", &self.search),
        ] {
            if let Some(value) = value {
                if !value.is_empty() {
                    pairs.push((key, value.clone()));
                }
            }
        }

        pairs
            .iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Reconstruct form state from a query string, converting date bounds
    /// back into ages for pre-filling the form.
    pub fn from_query_str(query: &str, today: NaiveDate) -> Self {
        let mut form = FilterForm::default();
        for (key, value) in parse_query_pairs(query) {
            if value.is_empty() {
                continue;
            }
            match key.as_str() {
                "ethnicity" => form.ethnicity = Some(value),
                "tag" => form.tag = Some(value),
                "gender" => form.gender = Some(value),
                "search" => form.search = Some(value),
                "dobBefore" => {
                    form.min_age = parse_bound_date(&value)
                        .ok()
                        .map(|d| age::age_from_dob(d, today));
                }
                "dobAfter" => {
                    form.max_age = parse_bound_date(&value)
                        .ok()
                        .map(|d| age::age_from_dob(d, today));
                }
                "minAge" => form.min_age = parse_age(&value),
                "maxAge" => form.max_age = parse_age(&value),
                _ => {}
            }
        }
        form
    }
}

/// Decode `k=v&k2=v2` pairs. `+` is a form-encoded space.
pub fn parse_query_pairs(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|c| c.into_owned())
        .unwrap_or(spaced)
}

/// `-1` (and any nonpositive value) means "no limit".
fn parse_limit(raw: &str) -> Option<usize> {
    match raw.parse::<i64>() {
        Ok(n) if n > 0 => Some(n as usize),
        _ => None,
    }
}

fn parse_age(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

fn parse_bound_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("invalid date bound: {raw}")))
}
