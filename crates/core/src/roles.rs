//! Roles and the record scope they grant.
//!
//! Wardens see and change everything. Students see only records whose student
//! reference is their own linked Student record.

use crate::types::DbId;

define_text_enum! {
    /// Role carried in every access token.
    Role ("role") {
        Warden = "warden",
        Student = "student",
    }
}

/// Which student-owned records a caller may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordScope {
    /// Every record.
    All,
    /// Only records referencing this Student record.
    Own(DbId),
    /// A student account with no linked Student record yet.
    Nothing,
}

impl RecordScope {
    pub fn for_role(role: Role, linked_student: Option<DbId>) -> Self {
        match (role, linked_student) {
            (Role::Warden, _) => Self::All,
            (Role::Student, Some(id)) => Self::Own(id),
            (Role::Student, None) => Self::Nothing,
        }
    }

    /// Translate into a store filter.
    ///
    /// `None` means nothing is visible and the store need not be queried;
    /// `Some(None)` means unfiltered; `Some(Some(id))` filters by owner.
    pub fn student_filter(self) -> Option<Option<DbId>> {
        match self {
            Self::All => Some(None),
            Self::Own(id) => Some(Some(id)),
            Self::Nothing => None,
        }
    }

    /// Whether a record owned by `owner` is visible.
    pub fn permits(self, owner: DbId) -> bool {
        match self {
            Self::All => true,
            Self::Own(id) => id == owner,
            Self::Nothing => false,
        }
    }
}
