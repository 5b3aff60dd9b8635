pub mod admin;
pub mod buses;
pub mod error;
pub mod health;
pub mod routes;
pub mod schedule;
pub mod search;
pub mod updates;

pub use error::{internal_error, ErrorResponse};

use axum::http::StatusCode;
use axum::{Json, Router};
use sqlx::SqlitePool;
use std::sync::Arc;

pub fn router(pool: SqlitePool, admin_password: Arc<str>) -> Router {
    Router::new()
        .nest("/routes", routes::router(pool.clone()))
        .nest("/schedule", schedule::router(pool.clone()))
        .nest("/search", search::router(pool.clone()))
        .nest("/updates", updates::router(pool.clone()))
        .nest("/buses", buses::router())
        .nest("/admin", admin::router(admin_password))
        .nest("/health", health::router(pool))
        .fallback(invalid_endpoint)
}

/// Anything outside the route table, regardless of verb.
async fn invalid_endpoint() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Invalid endpoint".to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use crate::test_util::{body_json, get, request, test_app};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_unknown_endpoint_returns_invalid_endpoint() {
        let app = test_app().await;
        let res = get(app, "/foo").await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let json = body_json(res).await;
        assert_eq!(json, serde_json::json!({"error": "Invalid endpoint"}));
    }

    #[tokio::test]
    async fn test_unknown_endpoint_ignores_method() {
        let app = test_app().await;
        let res = request(app, "POST", "/frobnicate", None).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let json = body_json(res).await;
        assert_eq!(json["error"], "Invalid endpoint");
    }
}
