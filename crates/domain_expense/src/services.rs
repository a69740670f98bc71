//! Expense domain services
//!
//! The service glues the ports to the pure calculator and planner: it reads
//! a group's roster and expenses in one snapshot, then runs both
//! computations synchronously.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use core_kernel::GroupId;
use crate::balance::{BalanceCalculator, BalanceMap};
use crate::error::ExpenseError;
use crate::expense::Expense;
use crate::member::Roster;
use crate::ports::GroupLedger;
use crate::settlement::{Settlement, SettlementPlanner};
use crate::summary::ExpenseSummary;

/// Everything the settle-up screen needs for one group
#[derive(Debug, Clone, Serialize)]
pub struct SettleUpReport {
    pub balances: BalanceMap,
    pub settlements: Vec<Settlement>,
    pub summary: ExpenseSummary,
}

/// Service computing balances and settlements for stored groups
pub struct SettleUpService {
    ledger: Arc<dyn GroupLedger>,
    calculator: BalanceCalculator,
    planner: SettlementPlanner,
}

impl SettleUpService {
    /// Creates a new settle-up service
    ///
    /// # Arguments
    ///
    /// * `ledger` - Port returning a group's roster and expenses together
    /// * `calculator` - Balance calculator with the host's policies
    /// * `planner` - Settlement planner with the host's tolerance
    pub fn new(
        ledger: Arc<dyn GroupLedger>,
        calculator: BalanceCalculator,
        planner: SettlementPlanner,
    ) -> Self {
        Self {
            ledger,
            calculator,
            planner,
        }
    }

    pub fn calculator(&self) -> &BalanceCalculator {
        &self.calculator
    }

    pub fn planner(&self) -> &SettlementPlanner {
        &self.planner
    }

    /// Current balances for a stored group
    #[instrument(skip(self), fields(group = %group_id))]
    pub async fn balances(&self, group_id: GroupId) -> Result<BalanceMap, ExpenseError> {
        let (roster, expenses) = self.load(group_id).await?;
        self.calculator.calculate(&roster, &expenses)
    }

    /// Suggested payments for a stored group
    #[instrument(skip(self), fields(group = %group_id))]
    pub async fn settlements(&self, group_id: GroupId) -> Result<Vec<Settlement>, ExpenseError> {
        let balances = self.balances(group_id).await?;
        self.planner.plan(&balances)
    }

    /// Balances, settlements and totals for a stored group
    #[instrument(skip(self), fields(group = %group_id))]
    pub async fn report(&self, group_id: GroupId) -> Result<SettleUpReport, ExpenseError> {
        let (roster, expenses) = self.load(group_id).await?;
        self.evaluate(&roster, &expenses)
    }

    /// Runs the full pipeline over caller-supplied data
    ///
    /// Pure: no port is consulted.
    pub fn evaluate(&self, roster: &Roster, expenses: &[Expense]) -> Result<SettleUpReport, ExpenseError> {
        let balances = self.calculator.calculate(roster, expenses)?;
        let settlements = self.planner.plan(&balances)?;
        let summary = ExpenseSummary::from_expenses(self.calculator.currency(), expenses)?;

        debug!(
            members = balances.len(),
            expenses = summary.expense_count,
            settlements = settlements.len(),
            "Settle-up evaluated"
        );

        Ok(SettleUpReport {
            balances,
            settlements,
            summary,
        })
    }

    async fn load(&self, group_id: GroupId) -> Result<(Roster, Vec<Expense>), ExpenseError> {
        let (roster, expenses) = self.ledger.ledger(group_id).await?;
        debug!(members = roster.len(), expenses = expenses.len(), "Loaded group ledger");
        Ok((roster, expenses))
    }
}
