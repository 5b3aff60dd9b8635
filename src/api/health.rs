use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;
use utoipa::ToSchema;

use crate::api::error::{internal_error, method_not_allowed, ApiError};

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Whether the service is running
    pub healthy: bool,
    /// Number of seeded routes
    pub route_count: i64,
    /// Number of service updates currently posted
    pub update_count: i64,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health status", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(pool): State<SqlitePool>) -> Result<Json<HealthResponse>, ApiError> {
    let route_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM routes")
        .fetch_one(&pool)
        .await
        .map_err(internal_error)?;
    let update_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM service_updates")
        .fetch_one(&pool)
        .await
        .map_err(internal_error)?;

    Ok(Json(HealthResponse {
        healthy: true,
        route_count,
        update_count,
    }))
}

pub fn router(pool: SqlitePool) -> Router {
    Router::new()
        .route("/", get(health_check).fallback(method_not_allowed))
        .with_state(pool)
}
