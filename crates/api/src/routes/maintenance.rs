use axum::routing::{get, put};
use axum::Router;

use crate::handlers::maintenance;
use crate::state::AppState;

/// Routes mounted at `/maintenance`.
///
/// ```text
/// GET  /             -> list_tickets
/// POST /             -> create_ticket
/// PUT  /{id}/status  -> update_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(maintenance::list_tickets).post(maintenance::create_ticket),
        )
        .route("/{id}/status", put(maintenance::update_status))
}
