mod list;
mod manage;

pub use list::*;
pub use manage::*;

use crate::api::error::{bad_request, method_not_allowed, ApiError};
use axum::routing::get;
use axum::Router;
use sqlx::SqlitePool;

pub fn router(pool: SqlitePool) -> Router {
    Router::new()
        .route(
            "/",
            get(list_updates)
                .post(create_update)
                .delete(delete_without_id)
                .fallback(method_not_allowed),
        )
        .route(
            "/{id}",
            get(get_update)
                .delete(delete_update)
                .fallback(method_not_allowed),
        )
        .with_state(pool)
}

/// DELETE /updates without an id is a client mistake, not a bad verb.
async fn delete_without_id() -> ApiError {
    bad_request("Update ID required")
}
