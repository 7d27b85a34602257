use axum::routing::get;
use axum::Router;

use crate::handlers::movements;
use crate::state::AppState;

/// Routes mounted at `/movements`.
///
/// ```text
/// GET  /        -> list_movements
/// POST /        -> record_movement
/// GET  /recent  -> recent_movements
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(movements::list_movements).post(movements::record_movement),
        )
        .route("/recent", get(movements::recent_movements))
}
