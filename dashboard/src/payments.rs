//! Validated payment recording.
//!
//! This is the strict path: a payment must be positive and there must be
//! no payment for the project yet. The `MarkProjectPaid` action skips
//! these checks entirely.

use crate::stats::has_payment;
use crate::types::{Money, Payment, ProjectId};
use freelance_core::environment::Clock;
use thiserror::Error;

/// Reasons a payment is refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// Zero or negative amount
    #[error("Payment amount must be positive (got {amount})")]
    NonPositiveAmount {
        /// The rejected amount
        amount: Money,
    },

    /// A payment for the project is already on record
    #[error("Payment already exists for project {project_id}")]
    AlreadyPaid {
        /// The project that already has a payment
        project_id: ProjectId,
    },
}

/// Builds a payment after checking it against the existing ones
///
/// Nothing is stored: the caller decides what to do with the payment.
/// Rejections are logged at `error` level.
///
/// # Errors
///
/// - [`PaymentError::NonPositiveAmount`] if `amount <= 0`
/// - [`PaymentError::AlreadyPaid`] if `existing` has a payment for the project
pub fn record_payment(
    project_id: &ProjectId,
    amount: Money,
    existing: &[Payment],
    clock: &dyn Clock,
) -> Result<Payment, PaymentError> {
    if !amount.is_positive() {
        let error = PaymentError::NonPositiveAmount { amount };
        tracing::error!(%project_id, %amount, "{error}");
        return Err(error);
    }

    if has_payment(project_id, existing) {
        let error = PaymentError::AlreadyPaid {
            project_id: project_id.clone(),
        };
        tracing::error!(%project_id, "{error}");
        return Err(error);
    }

    Ok(Payment::new(project_id.clone(), amount, clock.now()))
}
