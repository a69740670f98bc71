//! Group spending totals

use serde::Serialize;

use core_kernel::{Currency, Money};
use crate::error::ExpenseError;
use crate::expense::Expense;

/// Headline numbers for a group's expense list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummary {
    pub expense_count: usize,
    pub total: Money,
}

impl ExpenseSummary {
    pub fn from_expenses(currency: Currency, expenses: &[Expense]) -> Result<Self, ExpenseError> {
        let total = expenses
            .iter()
            .try_fold(Money::zero(currency), |acc, e| acc.checked_add(&e.amount))?;

        Ok(Self {
            expense_count: expenses.len(),
            total,
        })
    }
}
