//! Handlers for the `/movements` ledger.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hostel_db::models::movement::CreateMovement;

use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireWarden;
use crate::query::LimitParams;
use crate::response::DataResponse;
use crate::services::movements;
use crate::state::AppState;

/// GET /api/movements
pub async fn list_movements(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let data = movements::list_movements(&state.stores, auth.scope()).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /api/movements
pub async fn record_movement(
    RequireWarden(_warden): RequireWarden,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateMovement>,
) -> AppResult<impl IntoResponse> {
    let data = movements::record_movement(&state.stores, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data })))
}

/// GET /api/movements/recent?limit=
pub async fn recent_movements(
    auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<LimitParams>,
) -> AppResult<impl IntoResponse> {
    let data = movements::recent_movements(&state.stores, auth.scope(), params.limit).await?;
    Ok(Json(DataResponse { data }))
}
