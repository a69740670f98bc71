//! Balance and settlement DTOs

use core_kernel::{Currency, Money};
use domain_expense::{BalanceMap, ExpenseSummary, SettleUpReport, Settlement};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::expense::CreateExpenseRequest;

/// Rounds to the currency's minor unit and pads to its full scale
pub(crate) fn display_amount(money: &Money) -> Decimal {
    let mut amount = money.round_to_currency().amount();
    amount.rescale(money.currency().decimal_places());
    amount
}

/// Inline ledger for the stateless settle-up endpoint
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SettleUpRequest {
    /// Roster, in order
    pub members: Vec<String>,
    #[validate(nested)]
    #[serde(default)]
    pub expenses: Vec<CreateExpenseRequest>,
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub member: String,
    pub paid: Decimal,
    pub owed: Decimal,
    pub net: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalancesResponse {
    pub currency: Currency,
    pub settled: bool,
    /// Roster order
    pub balances: Vec<BalanceResponse>,
}

impl BalancesResponse {
    pub fn new(balances: &BalanceMap, tolerance: Decimal) -> Self {
        Self {
            currency: balances.currency(),
            settled: balances.is_settled(tolerance),
            balances: balance_rows(balances),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SettlementResponse {
    pub from: String,
    pub to: String,
    pub amount: Decimal,
}

impl From<&Settlement> for SettlementResponse {
    fn from(settlement: &Settlement) -> Self {
        Self {
            from: settlement.from.to_string(),
            to: settlement.to.to_string(),
            amount: display_amount(&settlement.amount),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub expense_count: usize,
    pub total: Decimal,
}

impl From<&ExpenseSummary> for SummaryResponse {
    fn from(summary: &ExpenseSummary) -> Self {
        Self {
            expense_count: summary.expense_count,
            total: display_amount(&summary.total),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettleUpResponse {
    pub currency: Currency,
    pub settled: bool,
    pub balances: Vec<BalanceResponse>,
    pub settlements: Vec<SettlementResponse>,
    pub summary: SummaryResponse,
}

impl SettleUpResponse {
    pub fn new(report: &SettleUpReport, tolerance: Decimal) -> Self {
        Self {
            currency: report.balances.currency(),
            settled: report.balances.is_settled(tolerance),
            balances: balance_rows(&report.balances),
            settlements: report.settlements.iter().map(SettlementResponse::from).collect(),
            summary: SummaryResponse::from(&report.summary),
        }
    }
}

/// Result of marking a group as settled
#[derive(Debug, Serialize)]
pub struct SettleGroupResponse {
    pub cleared: usize,
}

fn balance_rows(balances: &BalanceMap) -> Vec<BalanceResponse> {
    balances
        .iter()
        .map(|(member, balance)| BalanceResponse {
            member: member.to_string(),
            paid: display_amount(&balance.paid),
            owed: display_amount(&balance.owed),
            net: display_amount(&balance.net),
        })
        .collect()
}
