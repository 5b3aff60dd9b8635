use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};
use utoipa::ToSchema;

use crate::api::error::{internal_error, not_found, ApiError};
use crate::api::ErrorResponse;

/// An administrator-authored announcement shown on the rider-facing feed.
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct ServiceUpdate {
    pub id: i64,
    pub title: String,
    pub message: String,
    /// Server-assigned RFC 3339 UTC timestamp
    pub created_at: String,
}

/// List all service updates, newest first
#[utoipa::path(
    get,
    path = "/updates",
    responses(
        (status = 200, description = "All service updates, newest first", body = Vec<ServiceUpdate>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "updates"
)]
pub async fn list_updates(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<ServiceUpdate>>, ApiError> {
    let updates: Vec<ServiceUpdate> = sqlx::query_as(
        "SELECT id, title, message, created_at
         FROM service_updates
         ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(&pool)
    .await
    .map_err(internal_error)?;

    Ok(Json(updates))
}

/// Fetch one service update by id
#[utoipa::path(
    get,
    path = "/updates/{id}",
    params(("id" = i64, Path, description = "Service update id")),
    responses(
        (status = 200, description = "The service update", body = ServiceUpdate),
        (status = 404, description = "No update with that id", body = ErrorResponse)
    ),
    tag = "updates"
)]
pub async fn get_update(
    State(pool): State<SqlitePool>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ServiceUpdate>, ApiError> {
    // A non-numeric id can't match any update; answer in the JSON error
    // shape rather than the framework's plain-text path rejection.
    let Ok(Path(id)) = id else {
        return Err(not_found("Update not found"));
    };
    let update: Option<ServiceUpdate> =
        sqlx::query_as("SELECT id, title, message, created_at FROM service_updates WHERE id = ?")
            .bind(id)
            .fetch_optional(&pool)
            .await
            .map_err(internal_error)?;

    update
        .map(Json)
        .ok_or_else(|| not_found("Update not found"))
}
