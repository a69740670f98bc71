//! Expense Domain Ports
//!
//! The settlement engine never owns data. It reads a group's roster and
//! expense list through these traits; the host decides where they live.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_expense::{SettleUpService, BalanceCalculator, SettlementPlanner};
//!
//! let store = Arc::new(InMemoryGroupStore::new());
//! let service = SettleUpService::new(
//!     store,
//!     BalanceCalculator::new(Currency::INR),
//!     SettlementPlanner::default(),
//! );
//! let report = service.report(group_id).await?;
//! ```

use async_trait::async_trait;

use core_kernel::{DomainPort, GroupId, PortError};

use crate::expense::Expense;
use crate::member::Roster;

/// Source of a group's recorded expenses
#[async_trait]
pub trait ExpenseStore: DomainPort {
    /// Returns every expense recorded for the group
    ///
    /// # Errors
    ///
    /// `PortError::NotFound` if the group does not exist
    async fn list_expenses(&self, group_id: GroupId) -> Result<Vec<Expense>, PortError>;
}

/// Source of a group's ordered member roster
#[async_trait]
pub trait RosterSource: DomainPort {
    /// Returns the group's members in roster order
    ///
    /// # Errors
    ///
    /// `PortError::NotFound` if the group does not exist
    async fn roster(&self, group_id: GroupId) -> Result<Roster, PortError>;
}

/// A group's roster and expenses read together
///
/// Reading the two through separate calls can pair a stale roster with a
/// newer expense list. Implementations must return both from one consistent
/// view of the group.
#[async_trait]
pub trait GroupLedger: ExpenseStore + RosterSource {
    /// Returns the roster and the expenses as of the same moment
    ///
    /// # Errors
    ///
    /// `PortError::NotFound` if the group does not exist
    async fn ledger(&self, group_id: GroupId) -> Result<(Roster, Vec<Expense>), PortError>;
}
