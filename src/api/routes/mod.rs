mod list;

pub use list::*;

use crate::api::error::method_not_allowed;
use axum::routing::get;
use axum::Router;
use sqlx::SqlitePool;

pub fn router(pool: SqlitePool) -> Router {
    Router::new()
        .route("/", get(list_routes).fallback(method_not_allowed))
        .with_state(pool)
}
