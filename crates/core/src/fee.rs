//! Fee ledger rules.
//!
//! A fee is overdue when its due date is strictly before "now" and it has not
//! been paid. The stored status only moves `pending -> overdue` when a sweep
//! or explicit refresh persists it, so queries classify by date instead of
//! trusting the column.

use crate::error::CoreError;
use crate::types::Timestamp;

define_text_enum! {
    /// Payment state of a fee record.
    FeeStatus ("fee status") {
        Pending = "pending",
        Paid = "paid",
        Overdue = "overdue",
    }
}

/// Query-time overdue classification.
pub fn is_overdue(status: FeeStatus, due_date: Timestamp, now: Timestamp) -> bool {
    status != FeeStatus::Paid && due_date < now
}

/// Whether a sweep should persist `overdue` on this record.
pub fn needs_overdue_mark(status: FeeStatus, due_date: Timestamp, now: Timestamp) -> bool {
    status == FeeStatus::Pending && due_date < now
}

/// Payment is irreversible; a paid record cannot be paid again.
pub fn ensure_payable(status: FeeStatus) -> Result<(), CoreError> {
    if status == FeeStatus::Paid {
        return Err(CoreError::InvalidState("Fee has already been paid".into()));
    }
    Ok(())
}

/// Amounts are finite and non-negative.
pub fn validate_amount(amount: f64) -> Result<(), CoreError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(CoreError::Validation(format!(
            "Fee amount must be a non-negative number, got {amount}"
        )));
    }
    Ok(())
}
