//! Handler for the dashboard summary.

use axum::extract::State;
use axum::Json;
use hostel_db::models::dashboard::DashboardStats;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::services::dashboard;
use crate::state::AppState;

/// GET /api/dashboard/stats
pub async fn get_stats(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardStats>>> {
    let data = dashboard::get_stats(&state.stores, auth.scope()).await?;
    Ok(Json(DataResponse { data }))
}
