//! Greedy settlement planning
//!
//! Debtors and creditors are matched with two cursors walking both lists in
//! balance-map order. Each step pays the smaller of the two open amounts, so
//! every payment closes at least one position and the plan never has more
//! than `debtors + creditors - 1` entries.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::Money;
use crate::balance::BalanceMap;
use crate::error::ExpenseError;
use crate::member::Member;

/// Largest leftover the planner accepts before reporting an unbalanced ledger
pub const DEFAULT_TOLERANCE: Decimal = dec!(0.01);

/// A single directed payment that moves a debtor towards zero
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Member paying (negative net at planning time)
    pub from: Member,
    /// Member receiving (positive net at planning time)
    pub to: Member,
    /// Always positive
    pub amount: Money,
}

/// An open debt or credit and how much of it is still unmatched
#[derive(Debug)]
struct Position<'a> {
    member: &'a Member,
    remaining: Decimal,
}

/// Turns balances into a short list of payments that zero every net
#[derive(Debug, Clone, Copy)]
pub struct SettlementPlanner {
    tolerance: Decimal,
}

impl Default for SettlementPlanner {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

impl SettlementPlanner {
    /// Creates a planner with the given residual tolerance
    pub fn new(tolerance: Decimal) -> Self {
        Self {
            tolerance: tolerance.abs(),
        }
    }

    pub fn tolerance(&self) -> Decimal {
        self.tolerance
    }

    /// Plans the payments that settle `balances`
    ///
    /// Output order is deterministic: debtors are served in balance-map
    /// order, each paying creditors in balance-map order.
    ///
    /// # Errors
    ///
    /// Returns `UnbalancedLedger` if, once either side is exhausted, the
    /// amounts still open on both sides add up to more than the tolerance.
    pub fn plan(&self, balances: &BalanceMap) -> Result<Vec<Settlement>, ExpenseError> {
        let currency = balances.currency();
        let mut debts = Vec::new();
        let mut credits = Vec::new();

        for (member, balance) in balances {
            let net = balance.net.amount();
            if net < Decimal::ZERO {
                debts.push(Position { member, remaining: -net });
            } else if net > Decimal::ZERO {
                credits.push(Position { member, remaining: net });
            }
        }

        let mut settlements = Vec::with_capacity(debts.len() + credits.len());
        let (mut i, mut j) = (0, 0);

        while i < debts.len() && j < credits.len() {
            let amount = debts[i].remaining.min(credits[j].remaining);

            settlements.push(Settlement {
                from: debts[i].member.clone(),
                to: credits[j].member.clone(),
                amount: Money::new(amount, currency),
            });

            debts[i].remaining -= amount;
            credits[j].remaining -= amount;

            if debts[i].remaining.is_zero() {
                i += 1;
            }
            if credits[j].remaining.is_zero() {
                j += 1;
            }
        }

        let residual: Decimal = debts[i..]
            .iter()
            .chain(credits[j..].iter())
            .map(|p| p.remaining)
            .sum();

        if residual > self.tolerance {
            return Err(ExpenseError::UnbalancedLedger {
                residual,
                tolerance: self.tolerance,
            });
        }

        Ok(settlements)
    }
}
