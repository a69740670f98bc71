//! Expense handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use core_kernel::{ExpenseId, GroupId};
use uuid::Uuid;
use validator::Validate;

use crate::{AppState, error::ApiError};
use crate::dto::expense::*;

/// Lists a group's expenses, newest first
pub async fn list_expenses(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ExpenseResponse>>, ApiError> {
    let record = state.store.get_group(GroupId::from_uuid(id)).await?;
    let expenses = record
        .expenses
        .iter()
        .map(ExpenseResponse::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(expenses))
}

/// Records an expense
pub async fn create_expense(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<ExpenseResponse>), ApiError> {
    request.validate()?;
    let expense = request.into_expense(state.config.currency)?;

    let expense = state.store.add_expense(GroupId::from_uuid(id), expense).await?;
    Ok((StatusCode::CREATED, Json(ExpenseResponse::try_from(&expense)?)))
}

/// Deletes an expense
pub async fn delete_expense(
    State(state): State<AppState>,
    Path((id, expense_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .delete_expense(GroupId::from_uuid(id), ExpenseId::from_uuid(expense_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
