//! Maintenance ticket status vocabulary.
//!
//! Any status may be set from any other; only membership in the vocabulary
//! is enforced.

define_text_enum! {
    /// Ticket progress.
    TicketStatus ("ticket status") {
        Pending = "pending",
        InProgress = "in_progress",
        Completed = "completed",
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::error::CoreError;

    #[test]
    fn parses_known_statuses() {
        assert_eq!("in_progress".parse::<TicketStatus>().unwrap(), TicketStatus::InProgress);
        assert_eq!(TicketStatus::Completed.to_string(), "completed");
    }

    #[test]
    fn unknown_status_is_a_validation_error() {
        let err = "resolved".parse::<TicketStatus>().unwrap_err();
        assert_matches!(err, CoreError::Validation(ref msg) if msg.contains("pending, in_progress, completed"));
    }
}
