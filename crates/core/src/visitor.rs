//! Visitor log rules.

use crate::error::CoreError;

define_text_enum! {
    /// Visit lifecycle. A visit is checked out exactly once.
    VisitorStatus ("visitor status") {
        CheckedIn = "checked_in",
        CheckedOut = "checked_out",
    }
}

/// Only an open visit can be closed.
pub fn ensure_can_check_out(status: VisitorStatus) -> Result<(), CoreError> {
    match status {
        VisitorStatus::CheckedIn => Ok(()),
        VisitorStatus::CheckedOut => Err(CoreError::InvalidState(
            "Visitor has already checked out".into(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn double_checkout_is_invalid() {
        assert!(ensure_can_check_out(VisitorStatus::CheckedIn).is_ok());
        assert_matches!(
            ensure_can_check_out(VisitorStatus::CheckedOut),
            Err(CoreError::InvalidState(_))
        );
    }
}
