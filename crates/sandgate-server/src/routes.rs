//! HTTP routes.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use tracing::info;

use crate::auth::{CurrentUser, authenticate};
use crate::state::AppState;

/// Build the application router.
///
/// - `GET /health`: liveness, unauthenticated
/// - `GET /api/auth/method`: which auth method is active, unauthenticated
/// - `GET /api/me`: the authenticated user
/// - `POST /api/login`: authenticate and return the user
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/me", get(me))
        .route("/login", post(login))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .route("/auth/method", get(auth_method));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn auth_method(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "method": state.auth.method(),
        "loginPage": state.auth.requires_login_page(),
    }))
}

async fn me(CurrentUser(user): CurrentUser) -> impl IntoResponse {
    Json(user)
}

async fn login(CurrentUser(user): CurrentUser) -> impl IntoResponse {
    info!(username = %user.username, id = user.id, "login");
    Json(user)
}
