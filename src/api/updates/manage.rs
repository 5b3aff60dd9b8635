use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use utoipa::ToSchema;

use crate::api::error::{bad_request, internal_error, not_found, ApiError};
use crate::api::ErrorResponse;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUpdateRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateUpdateResponse {
    pub success: bool,
    /// Id of the newly created update
    pub id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteUpdateResponse {
    pub success: bool,
}

/// Create a service update with a server-assigned timestamp
#[utoipa::path(
    post,
    path = "/updates",
    request_body = CreateUpdateRequest,
    responses(
        (status = 200, description = "Update created", body = CreateUpdateResponse),
        (status = 400, description = "Missing title or message", body = ErrorResponse)
    ),
    tag = "updates"
)]
pub async fn create_update(
    State(pool): State<SqlitePool>,
    payload: Result<Json<CreateUpdateRequest>, JsonRejection>,
) -> Result<Json<CreateUpdateResponse>, ApiError> {
    // A missing or malformed body carries no title/message either; keep the
    // JSON error shape instead of the framework's plain-text rejection.
    let Ok(Json(request)) = payload else {
        return Err(bad_request("Title and message required"));
    };
    if request.title.is_empty() || request.message.is_empty() {
        return Err(bad_request("Title and message required"));
    }

    let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO service_updates (title, message, created_at)
         VALUES (?, ?, ?)
         RETURNING id",
    )
    .bind(&request.title)
    .bind(&request.message)
    .bind(&created_at)
    .fetch_one(&pool)
    .await
    .map_err(internal_error)?;

    tracing::info!(id, title = %request.title, "service update posted");
    Ok(Json(CreateUpdateResponse { success: true, id }))
}

/// Delete a service update by id
#[utoipa::path(
    delete,
    path = "/updates/{id}",
    params(("id" = i64, Path, description = "Service update id")),
    responses(
        (status = 200, description = "Update deleted", body = DeleteUpdateResponse),
        (status = 404, description = "No update with that id", body = ErrorResponse)
    ),
    tag = "updates"
)]
pub async fn delete_update(
    State(pool): State<SqlitePool>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeleteUpdateResponse>, ApiError> {
    // A non-numeric id is the same client mistake as no id at all.
    let Ok(Path(id)) = id else {
        return Err(bad_request("Update ID required"));
    };
    let result = sqlx::query("DELETE FROM service_updates WHERE id = ?")
        .bind(id)
        .execute(&pool)
        .await
        .map_err(internal_error)?;

    if result.rows_affected() == 0 {
        return Err(not_found("Update not found"));
    }

    tracing::info!(id, "service update deleted");
    Ok(Json(DeleteUpdateResponse { success: true }))
}
