use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::api::ErrorResponse;

#[derive(Clone)]
pub struct AdminState {
    /// Shared secret from the config file, never hard-coded.
    pub password: Arc<str>,
}

pub fn router(password: Arc<str>) -> Router {
    let state = AdminState { password };
    Router::new()
        .route("/login", post(admin_login).fallback(invalid_admin_action))
        .fallback(invalid_admin_action)
        .with_state(state)
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Check the admin password. No session or token is issued; the frontend
/// keeps its own logged-in flag.
#[utoipa::path(
    post,
    path = "/admin/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Password accepted", body = LoginResponse),
        (status = 401, description = "Password rejected", body = LoginResponse)
    ),
    tag = "admin"
)]
pub async fn admin_login(
    State(state): State<AdminState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> (StatusCode, Json<LoginResponse>) {
    // A missing or malformed body carries no password, which is just a
    // wrong password.
    let password = payload.map(|Json(r)| r.password).unwrap_or_default();
    if password == *state.password {
        (
            StatusCode::OK,
            Json(LoginResponse {
                success: true,
                error: None,
            }),
        )
    } else {
        tracing::warn!("admin login rejected");
        (
            StatusCode::UNAUTHORIZED,
            Json(LoginResponse {
                success: false,
                error: Some("Invalid password".to_string()),
            }),
        )
    }
}

/// Anything under /admin other than POST /admin/login.
async fn invalid_admin_action() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Invalid admin action".to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use crate::test_util::{body_json, get, post_json, post_raw, test_app};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_login_with_correct_password() {
        let app = test_app().await;
        let res = post_json(
            app,
            "/admin/login",
            serde_json::json!({"password": "admin123"}),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let json = body_json(res).await;
        assert_eq!(json, serde_json::json!({"success": true}));
    }

    #[tokio::test]
    async fn test_login_with_wrong_password() {
        let app = test_app().await;
        let res = post_json(
            app,
            "/admin/login",
            serde_json::json!({"password": "letmein"}),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(res).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Invalid password");
    }

    #[tokio::test]
    async fn test_login_with_empty_password() {
        let app = test_app().await;
        let res = post_json(app, "/admin/login", serde_json::json!({})).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(res).await;
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn test_login_without_body_is_wrong_password() {
        let app = test_app().await;
        let res = post_raw(app, "/admin/login", None).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(res).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Invalid password");
    }

    #[tokio::test]
    async fn test_login_rejects_get() {
        let app = test_app().await;
        let res = get(app, "/admin/login").await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let json = body_json(res).await;
        assert_eq!(json["error"], "Invalid admin action");
    }

    #[tokio::test]
    async fn test_unknown_admin_action() {
        let app = test_app().await;
        let res = post_json(app, "/admin/logout", serde_json::json!({})).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let json = body_json(res).await;
        assert_eq!(json["error"], "Invalid admin action");
    }
}
