//! PostgreSQL store implementations.
//!
//! Each repository wraps a shared [`PgPool`](sqlx::PgPool) and implements
//! one of the traits in [`crate::store`]. Conditional writes put their guard
//! in the `WHERE` clause and report a failed guard as `None`/`false`.

pub mod fee_repo;
pub mod maintenance_repo;
pub mod movement_repo;
pub mod room_repo;
pub mod student_repo;
pub mod user_repo;
pub mod visitor_repo;

pub use fee_repo::FeeRepo;
pub use maintenance_repo::MaintenanceRepo;
pub use movement_repo::MovementRepo;
pub use room_repo::RoomRepo;
pub use student_repo::StudentRepo;
pub use user_repo::UserRepo;
pub use visitor_repo::VisitorRepo;
