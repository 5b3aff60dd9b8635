use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use utoipa::{IntoParams, ToSchema};

use crate::api::error::{bad_request, internal_error, method_not_allowed, ApiError};
use crate::api::ErrorResponse;

pub fn router(pool: SqlitePool) -> Router {
    Router::new()
        .route("/", get(search_stops).fallback(method_not_allowed))
        .with_state(pool)
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Substring matched against stop and route names
    pub q: Option<String>,
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct SearchResult {
    pub route_name: String,
    pub stop_name: String,
    pub route_id: i64,
}

/// Search stops and routes by name substring, case-insensitively
#[utoipa::path(
    get,
    path = "/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching route/stop pairs, empty when nothing matches", body = Vec<SearchResult>),
        (status = 400, description = "Missing query", body = ErrorResponse)
    ),
    tag = "search"
)]
pub async fn search_stops(
    State(pool): State<SqlitePool>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<SearchResult>>, ApiError> {
    let q = match query.q.as_deref() {
        Some(q) if !q.is_empty() => q,
        _ => return Err(bad_request("Search query required")),
    };

    // SQLite LIKE is case-insensitive for ASCII, matching the frontend's
    // expectation that "harbor" and "HARBOR" find the same stops.
    let pattern = format!("%{}%", q);
    let results: Vec<SearchResult> = sqlx::query_as(
        "SELECT DISTINCT r.name AS route_name, s.name AS stop_name, r.id AS route_id
         FROM routes r
         JOIN stops s ON r.id = s.route_id
         WHERE s.name LIKE ? OR r.name LIKE ?",
    )
    .bind(&pattern)
    .bind(&pattern)
    .fetch_all(&pool)
    .await
    .map_err(internal_error)?;

    Ok(Json(results))
}
