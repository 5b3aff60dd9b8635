//! Helpers for exercising the full router against an in-memory database.

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower::ServiceExt;

/// Migrated in-memory database. Kept to a single connection because every
/// `sqlite::memory:` connection is a separate database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

pub async fn test_app() -> Router {
    crate::api::router(test_pool().await, Arc::from("admin123"))
}

pub async fn request(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    request(app, "GET", uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    request(app, "POST", uri, Some(body)).await
}

/// POST with an arbitrary (possibly invalid) payload; `None` sends no body
/// and no content-type at all.
pub async fn post_raw(app: Router, uri: &str, body: Option<&str>) -> Response {
    let builder = Request::builder().method("POST").uri(uri);
    let request = match body {
        Some(raw) => builder
            .header("content-type", "application/json")
            .body(Body::from(raw.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
