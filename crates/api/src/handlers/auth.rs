//! Handlers for the `/auth` resource (register, login, current user).
//!
//! Auth responses are returned without the data envelope.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hostel_db::models::user::UserResponse;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::services::identity::{self, AuthResponse, LoginRequest, RegisterRequest};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    let response = identity::register(&state.stores, &state.config, &input).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/auth/login
///
/// Authenticate with username + password.
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let response = identity::login(&state.stores, &state.config, &input).await?;
    Ok(Json(response))
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser, State(state): State<AppState>) -> AppResult<Json<UserResponse>> {
    let user = identity::current_user(&state.stores, auth.user_id).await?;
    Ok(Json(user))
}
