//! Expense Domain - Shared Expense Splitting and Settlement
//!
//! This crate turns a group's shared expenses into per-member balances and a
//! short list of payments that settles everyone up.
//!
//! # Pipeline
//!
//! 1. **Balance Calculator**: every expense adds its amount to the payer's
//!    `paid` and an equal share to each participant's `owed`;
//!    `net = paid - owed`.
//! 2. **Settlement Planner**: debtors (net < 0) are matched against
//!    creditors (net > 0) greedily, both in roster order.
//!
//! Both steps are pure functions of their inputs. The [`services`] module
//! wires them to the [`ports`] a host implements.
//!
//! # Example
//!
//! ```rust
//! use core_kernel::{Currency, Money};
//! use domain_expense::{calculate_balances, plan_settlements, Expense, Member, Roster};
//! use rust_decimal_macros::dec;
//!
//! let roster = Roster::from_names(["A", "B", "C"]).unwrap();
//! let lunch = Expense::new(
//!     "Lunch",
//!     Money::new(dec!(300), Currency::INR),
//!     Member::new("A").unwrap(),
//!     roster.iter().cloned().collect(),
//! )
//! .unwrap();
//!
//! let balances = calculate_balances(Currency::INR, &roster, &[lunch]).unwrap();
//! let settlements = plan_settlements(&balances).unwrap();
//! assert_eq!(settlements.len(), 2);
//! assert_eq!(settlements[0].from.name(), "B");
//! assert_eq!(settlements[0].to.name(), "A");
//! ```

pub mod member;
pub mod expense;
pub mod balance;
pub mod settlement;
pub mod summary;
pub mod ports;
pub mod services;
pub mod error;

pub use member::{Member, Roster};
pub use expense::Expense;
pub use balance::{Balance, BalanceMap, BalanceCalculator, SplitPolicy, UnknownMemberPolicy};
pub use settlement::{Settlement, SettlementPlanner, DEFAULT_TOLERANCE};
pub use summary::ExpenseSummary;
pub use ports::{ExpenseStore, GroupLedger, RosterSource};
pub use services::{SettleUpService, SettleUpReport};
pub use error::ExpenseError;

use core_kernel::Currency;

/// Computes balances with the default policies (reject unknown members,
/// exact split)
pub fn calculate_balances(
    currency: Currency,
    roster: &Roster,
    expenses: &[Expense],
) -> Result<BalanceMap, ExpenseError> {
    BalanceCalculator::new(currency).calculate(roster, expenses)
}

/// Plans settlements with the default tolerance of one minor unit
pub fn plan_settlements(balances: &BalanceMap) -> Result<Vec<Settlement>, ExpenseError> {
    SettlementPlanner::default().plan(balances)
}
