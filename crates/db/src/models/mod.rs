//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO accepted from clients
//! - Where the service fills in server-side fields, an internal `New*` struct
//!   handed to the store

pub mod dashboard;
pub mod fee;
pub mod maintenance;
pub mod movement;
pub mod room;
pub mod student;
pub mod user;
pub mod visitor;
