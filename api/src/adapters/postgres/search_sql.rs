//! SQL generation for proximity search
//!
//! Builds a single PostGIS statement that filters, measures and orders in the
//! database. Kept separate from the repository so the generated SQL can be
//! checked without a running server.

use sea_orm::{DatabaseBackend, Statement, Value};

use crate::domain::entities::{ProximitySearch, SkillMatch, SortMode, WGS84_SRID};

/// Columns every search returns, in the shape `TailorSearchRow` expects
const SELECT_COLUMNS: &str = "id, name, latitude, longitude, \
     ST_Y(location_point::geometry) AS point_latitude, \
     ST_X(location_point::geometry) AS point_longitude, \
     skills, created_at";

/// Positional parameter collector for Postgres (`$1`, `$2`, ...)
#[derive(Default)]
struct Params {
    values: Vec<Value>,
}

impl Params {
    fn push(&mut self, value: impl Into<Value>) -> String {
        self.values.push(value.into());
        format!("${}", self.values.len())
    }
}

/// Build the search statement for an already resolved search
pub fn build_search_statement(search: &ProximitySearch) -> Statement {
    let mut params = Params::default();
    let mut conditions: Vec<String> = Vec::new();

    // ST_MakePoint takes (x, y) = (longitude, latitude)
    let origin = search.origin.map(|point| {
        let lon = params.push(point.lon());
        let lat = params.push(point.lat());
        format!(
            "ST_SetSRID(ST_MakePoint({}, {}), {})::geography",
            lon, lat, WGS84_SRID
        )
    });

    let distance = match &origin {
        Some(origin) => format!("ST_Distance(location_point, {}) / 1000.0", origin),
        None => "NULL::double precision".to_string(),
    };

    if let (Some(origin), Some(radius_m)) = (&origin, search.radius_meters()) {
        let radius = params.push(radius_m);
        conditions.push(format!(
            "ST_DWithin(location_point, {}, {})",
            origin, radius
        ));
    }

    if !search.skills.is_empty() {
        let skills: Vec<String> = search.skills.iter().map(|s| s.to_string()).collect();
        let skills = params.push(skills);
        let operator = match search.skill_match {
            SkillMatch::Any => "&&",
            SkillMatch::All => "@>",
        };
        conditions.push(format!("skills {} {}::text[]", operator, skills));
    }

    let order_by = match search.sort {
        SortMode::Distance if origin.is_some() => "distance_km ASC NULLS LAST, id ASC",
        _ => "created_at DESC, id ASC",
    };

    // Postgres takes BIGINT here; anything larger could never yield rows anyway
    let limit = params.push(i64::try_from(search.limit).unwrap_or(i64::MAX));
    let offset = params.push(i64::try_from(search.offset).unwrap_or(i64::MAX));

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };

    let sql = format!(
        "SELECT {}, {} AS distance_km FROM tailors{} ORDER BY {} LIMIT {} OFFSET {}",
        SELECT_COLUMNS, distance, where_clause, order_by, limit, offset
    );

    Statement::from_sql_and_values(DatabaseBackend::Postgres, sql, params.values)
}
