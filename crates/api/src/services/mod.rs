//! Component services.
//!
//! Each submodule owns one component's operations. Functions borrow the
//! [`Stores`](hostel_db::Stores) bundle they act on, so handlers, the
//! background sweep and unit tests can all drive them against any backend.
//! Role gates live in the extractors; record-level scope checks live here.

pub mod dashboard;
pub mod fees;
pub mod identity;
pub mod maintenance;
pub mod movements;
pub mod rooms;
pub mod students;
pub mod visitors;

#[cfg(test)]
pub(crate) mod test_support {
    use hostel_db::models::room::{CreateRoom, Room};
    use hostel_db::models::student::{CreateStudent, Student};
    use hostel_db::Stores;

    pub async fn student(stores: &Stores, code: &str) -> Student {
        stores
            .students
            .insert(&CreateStudent {
                name: format!("Student {code}"),
                email: format!("{}@example.com", code.to_lowercase()),
                phone: "555-0100".into(),
                student_id: code.into(),
            })
            .await
            .unwrap()
    }

    pub async fn room(stores: &Stores, number: &str, capacity: i32) -> Room {
        super::rooms::create_room(
            stores,
            &CreateRoom {
                room_number: number.into(),
                floor: 1,
                capacity,
            },
        )
        .await
        .unwrap()
    }
}
