//! Group DTOs

use chrono::{DateTime, Utc};
use core_kernel::GroupId;
use domain_expense::{ExpenseError, Member, Roster};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::store::GroupRecord;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub description: String,
    /// Initial roster, in order
    #[serde(default)]
    pub members: Vec<String>,
}

impl CreateGroupRequest {
    pub fn roster(&self) -> Result<Roster, ExpenseError> {
        Roster::from_names(self.members.iter().cloned())
    }
}

/// Partial update; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroupRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddMemberRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

impl AddMemberRequest {
    pub fn member(&self) -> Result<Member, ExpenseError> {
        Member::new(self.name.as_str())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupResponse {
    pub id: GroupId,
    pub name: String,
    pub description: String,
    pub members: Vec<String>,
    pub expense_count: usize,
    pub created_at: DateTime<Utc>,
}

impl From<GroupRecord> for GroupResponse {
    fn from(record: GroupRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            members: record.roster.iter().map(|m| m.to_string()).collect(),
            expense_count: record.expenses.len(),
            created_at: record.created_at,
        }
    }
}
