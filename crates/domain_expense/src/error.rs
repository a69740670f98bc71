//! Expense domain errors

use core_kernel::{ExpenseId, MoneyError, PortError};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur in the expense domain
#[derive(Debug, Error)]
pub enum ExpenseError {
    /// The split list is empty or names a member twice
    #[error("Invalid split for expense {expense}: {reason}")]
    InvalidSplit {
        expense: ExpenseId,
        reason: String,
    },

    /// Expense amount is zero or negative
    #[error("Invalid amount for expense {expense}: {amount}")]
    InvalidAmount {
        expense: ExpenseId,
        amount: Decimal,
    },

    /// A referenced member is not on the roster
    #[error("Unknown member: {0}")]
    UnknownMember(String),

    /// Member name is empty after trimming
    #[error("Invalid member name: {0:?}")]
    InvalidMember(String),

    /// Member name already present on the roster
    #[error("Duplicate member: {0}")]
    DuplicateMember(String),

    /// Debts and credits did not cancel out
    #[error("Unbalanced ledger: residual {residual} exceeds tolerance {tolerance}")]
    UnbalancedLedger {
        residual: Decimal,
        tolerance: Decimal,
    },

    /// Calculation error
    #[error("Calculation error: {0}")]
    Calculation(#[from] MoneyError),

    /// Failure reported by a collaborator port
    #[error(transparent)]
    Port(#[from] PortError),
}

impl ExpenseError {
    pub fn invalid_split(expense: ExpenseId, reason: impl Into<String>) -> Self {
        ExpenseError::InvalidSplit {
            expense,
            reason: reason.into(),
        }
    }

    pub fn unknown_member(name: impl Into<String>) -> Self {
        ExpenseError::UnknownMember(name.into())
    }

    /// Returns true when the error comes from malformed caller input rather
    /// than from an inconsistent ledger or a failing collaborator
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            ExpenseError::InvalidSplit { .. }
                | ExpenseError::InvalidAmount { .. }
                | ExpenseError::UnknownMember(_)
                | ExpenseError::InvalidMember(_)
                | ExpenseError::DuplicateMember(_)
        )
    }
}
