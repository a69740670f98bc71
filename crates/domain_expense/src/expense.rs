//! Shared expense records
//!
//! An expense is immutable once recorded: the host may delete it, never
//! edit it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use core_kernel::{ExpenseId, Money};
use crate::error::ExpenseError;
use crate::member::Member;

/// An amount paid by one member on behalf of a set of members
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Unique expense identifier
    pub id: ExpenseId,
    /// What the money was spent on
    pub description: String,
    /// Total amount paid
    pub amount: Money,
    /// The member who paid
    pub paid_by: Member,
    /// Members sharing the cost equally, in the order they were selected
    pub split_between: Vec<Member>,
    /// When the expense was recorded
    pub timestamp: DateTime<Utc>,
}

impl Expense {
    /// Creates and validates a new expense stamped with the current time
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` if the amount is not strictly positive
    /// - `InvalidSplit` if `split_between` is empty or lists a member twice
    pub fn new(
        description: impl Into<String>,
        amount: Money,
        paid_by: Member,
        split_between: Vec<Member>,
    ) -> Result<Self, ExpenseError> {
        let expense = Self {
            id: ExpenseId::new_v7(),
            description: description.into(),
            amount,
            paid_by,
            split_between,
            timestamp: Utc::now(),
        };
        expense.validate()?;
        Ok(expense)
    }

    /// Overrides the identifier
    pub fn with_id(mut self, id: ExpenseId) -> Self {
        self.id = id;
        self
    }

    /// Overrides the recording time
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Checks the amount and split invariants
    ///
    /// Expenses received from a collaborator may never have passed through
    /// [`Expense::new`], so the balance calculator calls this on every record.
    pub fn validate(&self) -> Result<(), ExpenseError> {
        if !self.amount.is_positive() {
            return Err(ExpenseError::InvalidAmount {
                expense: self.id,
                amount: self.amount.amount(),
            });
        }

        if self.split_between.is_empty() {
            return Err(ExpenseError::invalid_split(self.id, "split list is empty"));
        }

        let mut seen = HashSet::with_capacity(self.split_between.len());
        for member in &self.split_between {
            if !seen.insert(member.name()) {
                return Err(ExpenseError::invalid_split(
                    self.id,
                    format!("{} appears more than once", member),
                ));
            }
        }

        Ok(())
    }

    /// Number of members sharing this expense
    pub fn participant_count(&self) -> usize {
        self.split_between.len()
    }

    /// The equal per-person share
    pub fn share(&self) -> Result<Money, ExpenseError> {
        if self.split_between.is_empty() {
            return Err(ExpenseError::invalid_split(self.id, "split list is empty"));
        }
        Ok(self.amount.divide(Decimal::from(self.split_between.len()))?)
    }

    /// Returns true if the member paid for or shares this expense
    pub fn involves(&self, name: &str) -> bool {
        self.paid_by.name() == name || self.split_between.iter().any(|m| m.name() == name)
    }
}
