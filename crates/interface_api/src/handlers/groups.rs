//! Group and roster handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use core_kernel::GroupId;
use uuid::Uuid;
use validator::Validate;

use crate::{AppState, error::ApiError};
use crate::dto::group::*;

/// Creates a group with an initial roster
pub async fn create_group(
    State(state): State<AppState>,
    Json(request): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<GroupResponse>), ApiError> {
    request.validate()?;
    let roster = request.roster()?;

    let record = state
        .store
        .create_group(request.name, request.description, roster)
        .await;
    Ok((StatusCode::CREATED, Json(record.into())))
}

/// Lists groups, oldest first
pub async fn list_groups(
    State(state): State<AppState>,
) -> Json<Vec<GroupResponse>> {
    let groups = state.store.list_groups().await;
    Json(groups.into_iter().map(GroupResponse::from).collect())
}

/// Gets a group by ID
pub async fn get_group(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GroupResponse>, ApiError> {
    let record = state.store.get_group(GroupId::from_uuid(id)).await?;
    Ok(Json(record.into()))
}

/// Renames a group or changes its description
pub async fn update_group(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateGroupRequest>,
) -> Result<Json<GroupResponse>, ApiError> {
    request.validate()?;

    let record = state
        .store
        .update_group(GroupId::from_uuid(id), request.name, request.description)
        .await?;
    Ok(Json(record.into()))
}

/// Deletes a group with its roster and expenses
pub async fn delete_group(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.store.delete_group(GroupId::from_uuid(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Appends a member to the roster
pub async fn add_member(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AddMemberRequest>,
) -> Result<(StatusCode, Json<GroupResponse>), ApiError> {
    request.validate()?;
    let member = request.member()?;

    let record = state.store.add_member(GroupId::from_uuid(id), member).await?;
    Ok((StatusCode::CREATED, Json(record.into())))
}

/// Removes a member that no expense refers to
pub async fn remove_member(
    State(state): State<AppState>,
    Path((id, name)): Path<(Uuid, String)>,
) -> Result<Json<GroupResponse>, ApiError> {
    let record = state.store.remove_member(GroupId::from_uuid(id), &name).await?;
    Ok(Json(record.into()))
}
