//! Student presence status.
//!
//! Presence changes only through the movement ledger; see
//! [`crate::movement::MovementAction::resulting_status`].

define_text_enum! {
    /// Whether the student is currently inside the hostel.
    StudentStatus ("student status") {
        In = "in",
        Out = "out",
    }
}

impl Default for StudentStatus {
    /// New students start outside until their first check-in.
    fn default() -> Self {
        Self::Out
    }
}
