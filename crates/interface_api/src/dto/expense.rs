//! Expense DTOs

use chrono::{DateTime, Utc};
use core_kernel::{Currency, ExpenseId, Money};
use domain_expense::{Expense, ExpenseError, Member};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::settlement::display_amount;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    #[validate(length(min = 1, max = 200))]
    pub description: String,
    pub amount: Decimal,
    #[validate(length(min = 1, max = 100))]
    pub paid_by: String,
    pub split_between: Vec<String>,
    /// Defaults to the time the request is handled
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl CreateExpenseRequest {
    /// Builds a validated domain expense in the given currency
    pub fn into_expense(self, currency: Currency) -> Result<Expense, ExpenseError> {
        let paid_by = Member::new(self.paid_by)?;
        let split_between = self
            .split_between
            .into_iter()
            .map(Member::new)
            .collect::<Result<Vec<_>, _>>()?;

        let expense = Expense::new(
            self.description,
            Money::new(self.amount, currency),
            paid_by,
            split_between,
        )?;

        Ok(match self.timestamp {
            Some(timestamp) => expense.with_timestamp(timestamp),
            None => expense,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseResponse {
    pub id: ExpenseId,
    pub description: String,
    pub amount: Decimal,
    pub currency: Currency,
    pub paid_by: String,
    pub split_between: Vec<String>,
    pub per_person: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl TryFrom<&Expense> for ExpenseResponse {
    type Error = ExpenseError;

    fn try_from(expense: &Expense) -> Result<Self, Self::Error> {
        Ok(Self {
            id: expense.id,
            description: expense.description.clone(),
            amount: display_amount(&expense.amount),
            currency: expense.amount.currency(),
            paid_by: expense.paid_by.to_string(),
            split_between: expense.split_between.iter().map(|m| m.to_string()).collect(),
            per_person: display_amount(&expense.share()?),
            timestamp: expense.timestamp,
        })
    }
}
