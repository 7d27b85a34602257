//! Movement ledger rules.

use crate::student::StudentStatus;

/// Default page size for "recent movements".
pub const DEFAULT_RECENT_LIMIT: i64 = 50;
/// Upper bound for "recent movements".
pub const MAX_RECENT_LIMIT: i64 = 200;

define_text_enum! {
    /// A single check-in or check-out event.
    MovementAction ("movement action") {
        CheckIn = "check_in",
        CheckOut = "check_out",
    }
}

impl MovementAction {
    /// Presence status a student has after this action is appended.
    pub fn resulting_status(self) -> StudentStatus {
        match self {
            Self::CheckIn => StudentStatus::In,
            Self::CheckOut => StudentStatus::Out,
        }
    }
}

/// Presence after replaying `actions` on top of `initial`. Last write wins.
pub fn presence_after<I>(initial: StudentStatus, actions: I) -> StudentStatus
where
    I: IntoIterator<Item = MovementAction>,
{
    actions
        .into_iter()
        .last()
        .map(MovementAction::resulting_status)
        .unwrap_or(initial)
}

/// Clamp a caller-supplied limit into `1..=MAX_RECENT_LIMIT`.
pub fn clamp_recent_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_RECENT_LIMIT)
        .clamp(1, MAX_RECENT_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_maps_to_status() {
        assert_eq!(MovementAction::CheckIn.resulting_status(), StudentStatus::In);
        assert_eq!(MovementAction::CheckOut.resulting_status(), StudentStatus::Out);
    }

    #[test]
    fn last_action_wins() {
        use MovementAction::{CheckIn, CheckOut};

        let cases: &[(&[MovementAction], StudentStatus)] = &[
            (&[], StudentStatus::Out),
            (&[CheckIn], StudentStatus::In),
            (&[CheckIn, CheckIn], StudentStatus::In),
            (&[CheckIn, CheckOut], StudentStatus::Out),
            (&[CheckOut, CheckOut, CheckIn], StudentStatus::In),
            (&[CheckIn, CheckOut, CheckIn, CheckOut], StudentStatus::Out),
        ];
        for (actions, expected) in cases {
            assert_eq!(
                presence_after(StudentStatus::default(), actions.iter().copied()),
                *expected,
                "actions {actions:?}"
            );
        }
    }

    #[test]
    fn unknown_action_is_rejected() {
        assert!("check_in".parse::<MovementAction>().is_ok());
        assert!("checkin".parse::<MovementAction>().is_err());
    }

    #[test]
    fn recent_limit_is_clamped() {
        assert_eq!(clamp_recent_limit(None), DEFAULT_RECENT_LIMIT);
        assert_eq!(clamp_recent_limit(Some(0)), 1);
        assert_eq!(clamp_recent_limit(Some(-5)), 1);
        assert_eq!(clamp_recent_limit(Some(10)), 10);
        assert_eq!(clamp_recent_limit(Some(10_000)), MAX_RECENT_LIMIT);
    }
}
