//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::{DateTime, Utc};
use core_kernel::{Currency, ExpenseId, Money};
use domain_expense::{Expense, ExpenseError, Member};
use rust_decimal::Decimal;

use crate::fixtures::{member, MoneyFixtures, TemporalFixtures};

/// Builder for constructing test expenses
///
/// Defaults to a 300 INR dinner paid by `A` and split between `A`, `B`
/// and `C`.
pub struct ExpenseBuilder {
    id: ExpenseId,
    description: String,
    amount: Money,
    paid_by: Member,
    split_between: Vec<Member>,
    timestamp: DateTime<Utc>,
}

impl Default for ExpenseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpenseBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            id: ExpenseId::new_v7(),
            description: "Dinner".to_string(),
            amount: MoneyFixtures::inr_300(),
            paid_by: member("A"),
            split_between: vec![member("A"), member("B"), member("C")],
            timestamp: TemporalFixtures::recorded_at(),
        }
    }

    /// Sets the expense ID
    pub fn with_id(mut self, id: ExpenseId) -> Self {
        self.id = id;
        self
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the amount in INR
    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Money::new(amount, Currency::INR);
        self
    }

    /// Sets the amount with an explicit currency
    pub fn with_money(mut self, amount: Money) -> Self {
        self.amount = amount;
        self
    }

    pub fn paid_by(mut self, name: &str) -> Self {
        self.paid_by = member(name);
        self
    }

    pub fn split_between(mut self, names: &[&str]) -> Self {
        self.split_between = names.iter().map(|n| member(n)).collect();
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Builds and validates the expense
    pub fn try_build(self) -> Result<Expense, ExpenseError> {
        Ok(Expense::new(self.description, self.amount, self.paid_by, self.split_between)?
            .with_id(self.id)
            .with_timestamp(self.timestamp))
    }

    /// Builds the expense, panicking if it is invalid
    pub fn build(self) -> Expense {
        self.try_build().expect("ExpenseBuilder produced an invalid expense")
    }

    /// Builds the expense without validation
    ///
    /// Useful for feeding the calculator records that a careless host might
    /// hand over.
    pub fn build_unchecked(self) -> Expense {
        Expense {
            id: self.id,
            description: self.description,
            amount: self.amount,
            paid_by: self.paid_by,
            split_between: self.split_between,
            timestamp: self.timestamp,
        }
    }
}

/// Shorthand for an INR expense with a default description
pub fn expense(amount: Decimal, paid_by: &str, split: &[&str]) -> Expense {
    ExpenseBuilder::new()
        .with_amount(amount)
        .paid_by(paid_by)
        .split_between(split)
        .build()
}
