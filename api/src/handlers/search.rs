//! Tailor search handlers
//!
//! The HTTP boundary is where caller input is validated. Anything that gets
//! past `parse_search_params` is a well-formed `SearchQuery`.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Serialize;

use crate::app::TailorSearchService;
use crate::domain::entities::{
    GeoPoint, SearchQuery, SearchReference, Skill, SkillMatch, SortMode, TailorMatch,
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
use crate::domain::ports::TailorSearchRepository;
use crate::error::{AppError, DomainError};
use crate::AppState;

const ZONE: &str = "referenceZone";
const LATITUDE: &str = "latitude";
const LONGITUDE: &str = "longitude";
const MAX_DISTANCE_KM: &str = "maxDistanceKm";
const SKILLS: &str = "skills";
const SKILL_MATCH: &str = "skillMatch";
const SORT_BY: &str = "sortBy";
const LIMIT: &str = "limit";
const OFFSET: &str = "offset";

/// Largest offset the store accepts (BIGINT)
const MAX_OFFSET: u64 = i64::MAX as u64;

const SINGLE_VALUED: [&str; 8] = [
    ZONE,
    LATITUDE,
    LONGITUDE,
    MAX_DISTANCE_KM,
    SKILL_MATCH,
    SORT_BY,
    LIMIT,
    OFFSET,
];

/// One tailor in a search response
#[derive(Debug, Serialize)]
pub struct TailorResponse {
    pub id: String,
    pub name: String,
    pub skills: Vec<Skill>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listed_at: Option<String>,
}

impl From<TailorMatch> for TailorResponse {
    fn from(m: TailorMatch) -> Self {
        TailorResponse {
            id: m.tailor.id.to_string(),
            name: m.tailor.name,
            skills: m.tailor.skills,
            latitude: m.tailor.latitude,
            longitude: m.tailor.longitude,
            created_at: m.tailor.created_at.to_rfc3339(),
            distance_km: m.distance_km,
            listed_at: m.listed_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Response for a tailor search
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// Ordering actually applied (distance degrades to recency without a reference)
    pub sort_by: SortMode,
    pub count: usize,
    pub tailors: Vec<TailorResponse>,
}

/// GET /tailors/search
///
/// Find tailors near a point or locality zone, optionally filtered by skills.
/// `skills` may be repeated and/or comma-separated.
pub async fn search_tailors<TR>(
    State(state): State<AppState<TR>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<SearchResponse>, AppError>
where
    TR: TailorSearchRepository + 'static,
{
    let Query(pairs) = query?;
    let query = parse_search_params(&pairs)?;
    let sort_by = TailorSearchService::<TR>::effective_sort(&query);

    let matches = state.search_service.search(&query).await?;
    let tailors: Vec<TailorResponse> = matches.into_iter().map(TailorResponse::from).collect();

    Ok(Json(SearchResponse {
        sort_by,
        count: tailors.len(),
        tailors,
    }))
}

/// Validate raw query pairs into a `SearchQuery`
pub fn parse_search_params(pairs: &[(String, String)]) -> Result<SearchQuery, AppError> {
    let mut single: Vec<(&str, &str)> = Vec::new();
    let mut skills: Vec<Skill> = Vec::new();

    for (key, value) in pairs {
        if key == SKILLS {
            for tag in value.split(',') {
                let skill = tag.parse::<Skill>().map_err(AppError::BadRequest)?;
                skills.push(skill);
            }
        } else if let Some(known) = SINGLE_VALUED.iter().find(|k| **k == key.as_str()) {
            if single.iter().any(|(k, _)| k == known) {
                return Err(bad_request(format!("{} given more than once", known)));
            }
            single.push((*known, value.as_str()));
        } else {
            return Err(bad_request(format!("unknown parameter: {}", key)));
        }
    }

    let get = |key: &str| single.iter().find(|(k, _)| *k == key).map(|(_, v)| *v);

    let zone = match get(ZONE).map(str::trim) {
        Some("") => return Err(bad_request(format!("{} must not be empty", ZONE))),
        other => other,
    };

    let point = match (get(LATITUDE), get(LONGITUDE)) {
        (Some(lat), Some(lon)) => Some(
            GeoPoint::new(parse_number(LATITUDE, lat)?, parse_number(LONGITUDE, lon)?)
                .map_err(|e| match e {
                    DomainError::Validation(msg) => AppError::BadRequest(msg),
                    other => AppError::Domain(other),
                })?,
        ),
        (None, None) => None,
        _ => {
            return Err(bad_request(format!(
                "{} and {} must be given together",
                LATITUDE, LONGITUDE
            )))
        }
    };

    let reference = match (zone, point) {
        (Some(_), Some(_)) => {
            return Err(bad_request(format!(
                "give either {} or {}/{}, not both",
                ZONE, LATITUDE, LONGITUDE
            )))
        }
        (Some(zone), None) => Some(SearchReference::Zone(zone.to_string())),
        (None, Some(point)) => Some(SearchReference::Point(point)),
        (None, None) => None,
    };

    let radius_km = match get(MAX_DISTANCE_KM) {
        Some(raw) => {
            let radius = parse_number(MAX_DISTANCE_KM, raw)?;
            if radius <= 0.0 {
                return Err(bad_request(format!("{} must be positive", MAX_DISTANCE_KM)));
            }
            if reference.is_none() {
                return Err(bad_request(format!(
                    "{} needs {} or {}/{}",
                    MAX_DISTANCE_KM, ZONE, LATITUDE, LONGITUDE
                )));
            }
            Some(radius)
        }
        None => None,
    };

    let skill_match = match get(SKILL_MATCH) {
        Some(raw) => raw.parse::<SkillMatch>().map_err(AppError::BadRequest)?,
        None => SkillMatch::default(),
    };

    let sort_by = match get(SORT_BY) {
        Some(raw) => raw.parse::<SortMode>().map_err(AppError::BadRequest)?,
        None if reference.is_some() => SortMode::Distance,
        None => SortMode::Recency,
    };

    let limit = match get(LIMIT) {
        Some(raw) => {
            let limit: u64 = parse_integer(LIMIT, raw)?;
            if !(1..=MAX_PAGE_SIZE).contains(&limit) {
                return Err(bad_request(format!(
                    "{} must be between 1 and {}",
                    LIMIT, MAX_PAGE_SIZE
                )));
            }
            limit
        }
        None => DEFAULT_PAGE_SIZE,
    };

    let offset = match get(OFFSET) {
        Some(raw) => {
            let offset = parse_integer(OFFSET, raw)?;
            if offset > MAX_OFFSET {
                return Err(bad_request(format!(
                    "{} must be at most {}",
                    OFFSET, MAX_OFFSET
                )));
            }
            offset
        }
        None => 0,
    };

    Ok(SearchQuery {
        reference,
        radius_km,
        skills,
        skill_match,
        sort_by,
        limit,
        offset,
    })
}

fn bad_request(msg: String) -> AppError {
    AppError::BadRequest(msg)
}

fn parse_number(name: &str, raw: &str) -> Result<f64, AppError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| bad_request(format!("{} is not a number: {}", name, raw)))
}

fn parse_integer(name: &str, raw: &str) -> Result<u64, AppError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| bad_request(format!("{} is not a non-negative integer: {}", name, raw)))
}
