//! Balance and settle-up handlers

use axum::{
    extract::{Path, State},
    Json,
};
use core_kernel::GroupId;
use domain_expense::{Expense, Roster};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{AppState, error::ApiError};
use crate::dto::settlement::*;

/// Current balances of a group
pub async fn get_balances(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BalancesResponse>, ApiError> {
    let balances = state.service.balances(GroupId::from_uuid(id)).await?;
    Ok(Json(BalancesResponse::new(&balances, state.service.planner().tolerance())))
}

/// Suggested payments for a group
pub async fn get_settlements(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<SettlementResponse>>, ApiError> {
    let settlements = state.service.settlements(GroupId::from_uuid(id)).await?;
    Ok(Json(settlements.iter().map(SettlementResponse::from).collect()))
}

/// Balances, settlements and totals of a group
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SettleUpResponse>, ApiError> {
    let report = state.service.report(GroupId::from_uuid(id)).await?;
    Ok(Json(SettleUpResponse::new(&report, state.service.planner().tolerance())))
}

/// Marks the group as settled by clearing its expenses
pub async fn settle_group(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SettleGroupResponse>, ApiError> {
    let cleared = state.store.clear_expenses(GroupId::from_uuid(id)).await?;
    Ok(Json(SettleGroupResponse { cleared }))
}

/// Settles an inline ledger without storing anything
pub async fn settle_up(
    State(state): State<AppState>,
    Json(request): Json<SettleUpRequest>,
) -> Result<Json<SettleUpResponse>, ApiError> {
    request.validate()?;

    let roster = Roster::from_names(request.members)?;
    let currency = state.service.calculator().currency();
    let expenses = request
        .expenses
        .into_iter()
        .map(|e| e.into_expense(currency))
        .collect::<Result<Vec<Expense>, _>>()?;

    let report = state.service.evaluate(&roster, &expenses)?;
    info!(
        members = roster.len(),
        expenses = expenses.len(),
        settlements = report.settlements.len(),
        "Inline ledger settled"
    );

    Ok(Json(SettleUpResponse::new(&report, state.service.planner().tolerance())))
}
