pub mod auth;
pub mod dashboard;
pub mod fees;
pub mod health;
pub mod maintenance;
pub mod movements;
pub mod rooms;
pub mod students;
pub mod visitors;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/me                             current user
///
/// /students                            list (scoped), create (warden)
/// /students/{id}                       get (warden or owner), update, delete (warden)
///
/// /rooms                               list, create (warden)
/// /rooms/available                     rooms with a free place
/// /rooms/{id}                          get, update, delete (warden)
/// /rooms/{id}/allocate/{student_id}    allocate (warden)
/// /rooms/{id}/vacate/{student_id}      vacate (warden)
///
/// /movements                           list (scoped), record (warden)
/// /movements/recent                    most recent N (scoped)
///
/// /visitors                            list (scoped), check in (warden)
/// /visitors/active                     still checked in (scoped)
/// /visitors/{id}/checkout              check out (warden)
///
/// /maintenance                         list (scoped), open (warden or self)
/// /maintenance/{id}/status             set status (warden)
///
/// /fees                                list (scoped), create (warden)
/// /fees/overdue                        unpaid and past due (scoped)
/// /fees/refresh-overdue                persist overdue status (warden)
/// /fees/{id}/pay                       pay (warden)
///
/// /dashboard/stats                     summary counts (scoped)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/students", students::router())
        .nest("/rooms", rooms::router())
        .nest("/movements", movements::router())
        .nest("/visitors", visitors::router())
        .nest("/maintenance", maintenance::router())
        .nest("/fees", fees::router())
        .nest("/dashboard", dashboard::router())
}
