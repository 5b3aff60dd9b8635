use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use utoipa::{IntoParams, ToSchema};

use crate::api::error::{bad_request, internal_error, method_not_allowed, not_found, ApiError};
use crate::api::ErrorResponse;

pub fn router(pool: SqlitePool) -> Router {
    Router::new()
        .route("/", get(get_schedule).fallback(method_not_allowed))
        .with_state(pool)
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ScheduleQuery {
    /// Numeric id of the route to look up
    pub route_id: Option<String>,
}

/// Raw row: `times` and `stops` are JSON-text arrays at rest.
#[derive(Debug, FromRow)]
struct ScheduleRow {
    id: i64,
    route_id: i64,
    times: String,
    stops: String,
    name: String,
    description: String,
    color: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScheduleResponse {
    pub id: i64,
    pub route_id: i64,
    /// Departure times in display order, e.g. "6:00 AM"
    pub times: Vec<String>,
    /// Stop names in the order the bus serves them
    pub stops: Vec<String>,
    /// Route name joined from the routes table
    pub name: String,
    pub description: String,
    pub color: String,
}

/// Get the schedule for one route, joined with the route's display fields
#[utoipa::path(
    get,
    path = "/schedule",
    params(ScheduleQuery),
    responses(
        (status = 200, description = "Schedule for the route", body = ScheduleResponse),
        (status = 400, description = "Missing route_id", body = ErrorResponse),
        (status = 404, description = "No schedule for that route", body = ErrorResponse)
    ),
    tag = "schedule"
)]
pub async fn get_schedule(
    State(pool): State<SqlitePool>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<ScheduleResponse>, ApiError> {
    let route_id = match query.route_id.as_deref() {
        Some(id) if !id.is_empty() => id,
        _ => return Err(bad_request("Route ID required")),
    };
    // A non-numeric id can't match any route, same as an unknown one.
    let route_id: i64 = match route_id.parse() {
        Ok(id) => id,
        Err(_) => return Err(not_found("Schedule not found")),
    };

    let row: Option<ScheduleRow> = sqlx::query_as(
        "SELECT s.id, s.route_id, s.times, s.stops, r.name, r.description, r.color
         FROM schedules s
         JOIN routes r ON s.route_id = r.id
         WHERE s.route_id = ?",
    )
    .bind(route_id)
    .fetch_optional(&pool)
    .await
    .map_err(internal_error)?;

    let row = row.ok_or_else(|| not_found("Schedule not found"))?;

    let times: Vec<String> = serde_json::from_str(&row.times).map_err(corrupt_schedule)?;
    let stops: Vec<String> = serde_json::from_str(&row.stops).map_err(corrupt_schedule)?;

    Ok(Json(ScheduleResponse {
        id: row.id,
        route_id: row.route_id,
        times,
        stops,
        name: row.name,
        description: row.description,
        color: row.color,
    }))
}

fn corrupt_schedule(e: serde_json::Error) -> ApiError {
    tracing::error!(error = %e, "stored schedule is not a valid JSON array");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: format!("Invalid schedule data: {}", e),
        }),
    )
}

#[cfg(test)]
mod tests {
    use crate::test_util::{body_json, get, request, test_app};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_schedule_decodes_times_and_stops() {
        let app = test_app().await;
        let res = get(app, "/schedule?route_id=1").await;
        assert_eq!(res.status(), StatusCode::OK);

        let json = body_json(res).await;
        assert_eq!(json["route_id"], 1);
        assert_eq!(json["name"], "Route 1");
        assert_eq!(json["color"], "#233962");
        let times = json["times"].as_array().unwrap();
        assert_eq!(times[0], "6:00 AM");
        let stops = json["stops"].as_array().unwrap();
        assert_eq!(stops[0], "Downtown Terminal");
        assert_eq!(stops.len(), 4);
    }

    #[tokio::test]
    async fn test_schedule_requires_route_id() {
        let app = test_app().await;
        let res = get(app, "/schedule").await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let json = body_json(res).await;
        assert_eq!(json["error"], "Route ID required");
    }

    #[tokio::test]
    async fn test_schedule_rejects_empty_route_id() {
        let app = test_app().await;
        let res = get(app, "/schedule?route_id=").await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let json = body_json(res).await;
        assert_eq!(json["error"], "Route ID required");
    }

    #[tokio::test]
    async fn test_schedule_unknown_route() {
        let app = test_app().await;
        let res = get(app, "/schedule?route_id=999").await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let json = body_json(res).await;
        assert_eq!(json["error"], "Schedule not found");
    }

    #[tokio::test]
    async fn test_schedule_non_numeric_route() {
        let app = test_app().await;
        let res = get(app, "/schedule?route_id=abc").await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let json = body_json(res).await;
        assert_eq!(json["error"], "Schedule not found");
    }

    #[tokio::test]
    async fn test_schedule_rejects_other_methods() {
        let app = test_app().await;
        let res = request(app, "DELETE", "/schedule?route_id=1", None).await;
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
        let json = body_json(res).await;
        assert_eq!(json["error"], "Method not allowed");
    }
}
