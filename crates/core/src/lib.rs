//! Domain rules for the hostel administration service.
//!
//! Everything in this crate is pure: status vocabularies, occupancy
//! arithmetic, overdue classification, role/record-scope rules and the error
//! taxonomy shared by the persistence and HTTP layers. No I/O happens here.

#[macro_use]
mod text_enum;

pub mod error;
pub mod fee;
pub mod maintenance;
pub mod movement;
pub mod roles;
pub mod room;
pub mod student;
pub mod types;
pub mod visitor;
