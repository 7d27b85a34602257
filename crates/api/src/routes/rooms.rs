use axum::routing::{get, post};
use axum::Router;

use crate::handlers::rooms;
use crate::state::AppState;

/// Routes mounted at `/rooms`.
///
/// ```text
/// GET    /                            -> list_rooms
/// POST   /                            -> create_room
/// GET    /available                   -> list_available
/// GET    /{id}                        -> get_room
/// PUT    /{id}                        -> update_room
/// DELETE /{id}                        -> delete_room
/// POST   /{id}/allocate/{student_id}  -> allocate
/// POST   /{id}/vacate/{student_id}    -> vacate
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(rooms::list_rooms).post(rooms::create_room))
        .route("/available", get(rooms::list_available))
        .route(
            "/{id}",
            get(rooms::get_room)
                .put(rooms::update_room)
                .delete(rooms::delete_room),
        )
        .route("/{id}/allocate/{student_id}", post(rooms::allocate))
        .route("/{id}/vacate/{student_id}", post(rooms::vacate))
}
