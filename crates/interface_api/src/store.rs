//! In-memory group store
//!
//! Holds every group's roster and expense list behind a single
//! `tokio::sync::RwLock`. It is the adapter behind the expense ports, so the
//! settle-up service reads the same data the handlers write.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::info;

use core_kernel::{DomainPort, ExpenseId, GroupId, PortError};
use domain_expense::{Expense, ExpenseStore, GroupLedger, Member, Roster, RosterSource};

/// A stored group
#[derive(Debug, Clone)]
pub struct GroupRecord {
    pub id: GroupId,
    pub name: String,
    pub description: String,
    pub roster: Roster,
    /// Newest first
    pub expenses: Vec<Expense>,
    pub created_at: DateTime<Utc>,
}

/// Group store kept in process memory
#[derive(Debug, Default)]
pub struct InMemoryGroupStore {
    groups: RwLock<HashMap<GroupId, GroupRecord>>,
}

impl InMemoryGroupStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a group with an initial roster
    pub async fn create_group(
        &self,
        name: impl Into<String>,
        description: impl Into<String>,
        roster: Roster,
    ) -> GroupRecord {
        let record = GroupRecord {
            id: GroupId::new_v7(),
            name: name.into(),
            description: description.into(),
            roster,
            expenses: Vec::new(),
            created_at: Utc::now(),
        };

        self.groups.write().await.insert(record.id, record.clone());
        info!(group = %record.id, members = record.roster.len(), "Group created");
        record
    }

    /// All groups, oldest first
    pub async fn list_groups(&self) -> Vec<GroupRecord> {
        let mut groups: Vec<GroupRecord> = self.groups.read().await.values().cloned().collect();
        groups.sort_by_key(|g| g.created_at);
        groups
    }

    pub async fn get_group(&self, id: GroupId) -> Result<GroupRecord, PortError> {
        self.groups
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Group", id))
    }

    /// Renames a group or changes its description
    ///
    /// Fields left as `None` keep their current value.
    pub async fn update_group(
        &self,
        id: GroupId,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<GroupRecord, PortError> {
        let mut groups = self.groups.write().await;
        let group = groups.get_mut(&id).ok_or_else(|| PortError::not_found("Group", id))?;

        if let Some(name) = name {
            group.name = name;
        }
        if let Some(description) = description {
            group.description = description;
        }

        info!(group = %id, "Group updated");
        Ok(group.clone())
    }

    /// Removes a group together with its roster and expenses
    pub async fn delete_group(&self, id: GroupId) -> Result<GroupRecord, PortError> {
        let removed = self
            .groups
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| PortError::not_found("Group", id))?;

        info!(group = %id, expenses = removed.expenses.len(), "Group deleted");
        Ok(removed)
    }

    /// Appends a member to the group's roster
    ///
    /// # Errors
    ///
    /// `Conflict` if the name is already on the roster
    pub async fn add_member(&self, id: GroupId, member: Member) -> Result<GroupRecord, PortError> {
        let mut groups = self.groups.write().await;
        let group = groups.get_mut(&id).ok_or_else(|| PortError::not_found("Group", id))?;

        group
            .roster
            .add(member.clone())
            .map_err(|e| PortError::conflict(e.to_string()))?;

        info!(group = %id, member = %member, "Member added");
        Ok(group.clone())
    }

    /// Removes a member who no expense refers to
    ///
    /// # Errors
    ///
    /// - `NotFound` if the member is not on the roster
    /// - `Conflict` if an expense still names the member
    pub async fn remove_member(&self, id: GroupId, name: &str) -> Result<GroupRecord, PortError> {
        let mut groups = self.groups.write().await;
        let group = groups.get_mut(&id).ok_or_else(|| PortError::not_found("Group", id))?;

        if !group.roster.contains(name) {
            return Err(PortError::not_found("Member", name));
        }

        let referenced = group.expenses.iter().filter(|e| e.involves(name)).count();
        if referenced > 0 {
            return Err(PortError::conflict(format!(
                "{} is referenced by {} expense(s)",
                name, referenced
            )));
        }

        group
            .roster
            .remove(name)
            .map_err(|_| PortError::not_found("Member", name))?;

        info!(group = %id, member = %name, "Member removed");
        Ok(group.clone())
    }

    /// Records an expense whose members are all on the roster
    ///
    /// # Errors
    ///
    /// `Validation` naming the first member missing from the roster
    pub async fn add_expense(&self, id: GroupId, expense: Expense) -> Result<Expense, PortError> {
        let mut groups = self.groups.write().await;
        let group = groups.get_mut(&id).ok_or_else(|| PortError::not_found("Group", id))?;

        if !group.roster.contains(expense.paid_by.name()) {
            return Err(PortError::validation_field(
                format!("Unknown member: {}", expense.paid_by),
                "paidBy",
            ));
        }
        if let Some(missing) = expense
            .split_between
            .iter()
            .find(|m| !group.roster.contains(m.name()))
        {
            return Err(PortError::validation_field(
                format!("Unknown member: {}", missing),
                "splitBetween",
            ));
        }

        group.expenses.insert(0, expense.clone());
        info!(group = %id, expense = %expense.id, amount = %expense.amount, "Expense recorded");
        Ok(expense)
    }

    pub async fn delete_expense(&self, id: GroupId, expense_id: ExpenseId) -> Result<Expense, PortError> {
        let mut groups = self.groups.write().await;
        let group = groups.get_mut(&id).ok_or_else(|| PortError::not_found("Group", id))?;

        let position = group
            .expenses
            .iter()
            .position(|e| e.id == expense_id)
            .ok_or_else(|| PortError::not_found("Expense", expense_id))?;

        let removed = group.expenses.remove(position);
        info!(group = %id, expense = %expense_id, "Expense deleted");
        Ok(removed)
    }

    /// Drops every expense of the group and returns how many were cleared
    pub async fn clear_expenses(&self, id: GroupId) -> Result<usize, PortError> {
        let mut groups = self.groups.write().await;
        let group = groups.get_mut(&id).ok_or_else(|| PortError::not_found("Group", id))?;

        let cleared = group.expenses.len();
        group.expenses.clear();
        info!(group = %id, cleared, "Group settled");
        Ok(cleared)
    }
}

impl DomainPort for InMemoryGroupStore {}

#[async_trait]
impl ExpenseStore for InMemoryGroupStore {
    async fn list_expenses(&self, group_id: GroupId) -> Result<Vec<Expense>, PortError> {
        Ok(self.get_group(group_id).await?.expenses)
    }
}

#[async_trait]
impl RosterSource for InMemoryGroupStore {
    async fn roster(&self, group_id: GroupId) -> Result<Roster, PortError> {
        Ok(self.get_group(group_id).await?.roster)
    }
}

#[async_trait]
impl GroupLedger for InMemoryGroupStore {
    async fn ledger(&self, group_id: GroupId) -> Result<(Roster, Vec<Expense>), PortError> {
        let groups = self.groups.read().await;
        let group = groups
            .get(&group_id)
            .ok_or_else(|| PortError::not_found("Group", group_id))?;
        Ok((group.roster.clone(), group.expenses.clone()))
    }
}
