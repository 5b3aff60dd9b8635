use axum::extract::State;
use axum::Json;
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};
use utoipa::ToSchema;

use crate::api::error::{internal_error, ApiError};

/// A bus route as seeded into the database. Read-only through the API.
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct Route {
    pub id: i64,
    /// Display name, e.g. "Route 3"
    pub name: String,
    /// Terminus-to-terminus description, e.g. "Campus - Harbor"
    pub description: String,
    /// Hex color used by the frontend map and route cards
    pub color: String,
}

/// List all bus routes in insertion order
#[utoipa::path(
    get,
    path = "/routes",
    responses(
        (status = 200, description = "List of all bus routes", body = Vec<Route>),
        (status = 500, description = "Internal server error", body = crate::api::ErrorResponse)
    ),
    tag = "routes"
)]
pub async fn list_routes(State(pool): State<SqlitePool>) -> Result<Json<Vec<Route>>, ApiError> {
    let routes: Vec<Route> =
        sqlx::query_as("SELECT id, name, description, color FROM routes ORDER BY id")
            .fetch_all(&pool)
            .await
            .map_err(internal_error)?;

    Ok(Json(routes))
}
