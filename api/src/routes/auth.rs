use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::{AppState, handlers};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/jwt", post(issue_token))
        .route("/logout", get(logout))
}

#[derive(Debug, Deserialize)]
struct TokenRequest {
    email: String,
}

#[derive(Serialize)]
struct SessionResponse {
    success: bool,
}

async fn issue_token(
    State(state): State<AppState>,
    Json(request): Json<TokenRequest>,
) -> Result<impl IntoResponse, AppError> {
    let cookie = handlers::auth::issue_session(&state, request.email)?;
    Ok(([(SET_COOKIE, cookie)], Json(SessionResponse { success: true })))
}

async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let cookie = handlers::auth::clear_session(&state);
    ([(SET_COOKIE, cookie)], Json(SessionResponse { success: true }))
}
