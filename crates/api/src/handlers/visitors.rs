//! Handlers for the `/visitors` log.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hostel_core::types::DbId;
use hostel_db::models::visitor::CreateVisitor;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireWarden;
use crate::response::DataResponse;
use crate::services::visitors;
use crate::state::AppState;

/// GET /api/visitors
///
/// Students see only visits they hosted.
pub async fn list_visitors(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let data = visitors::list_visitors(&state.stores, auth.scope()).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/visitors/active
pub async fn list_active(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let data = visitors::list_active(&state.stores, auth.scope()).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/visitors
pub async fn check_in(
    RequireWarden(_warden): RequireWarden,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateVisitor>,
) -> AppResult<impl IntoResponse> {
    let data = visitors::check_in(&state.stores, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data })))
}

/// POST /api/visitors/{id}/checkout
pub async fn check_out(
    RequireWarden(_warden): RequireWarden,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let data = visitors::check_out(&state.stores, id).await?;
    Ok(Json(DataResponse { data }))
}
