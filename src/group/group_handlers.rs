use axum::{
    body::Bytes,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::de::DeserializeOwned;
use tracing::{error, info, warn};

use crate::{
    error::{AppError, Result},
    response,
    state::AppState,
};
use super::group_dto::{CreateGroupRequest, GroupPath, UpdateGroupRequest};

fn invalid_body() -> AppError {
    AppError::BadRequest("Invalid request body".to_string())
}

/// Bodies are decoded whatever the Content-Type header says.
fn decode_body<T: DeserializeOwned>(body: &Bytes) -> serde_json::Result<T> {
    serde_json::from_slice(body)
}

fn service_failure(message: &str) -> AppError {
    AppError::Internal(message.to_string())
}

fn require_group_id(path: Option<Path<GroupPath>>) -> Result<String> {
    let GroupPath { group_id, .. } = path.map(|Path(p)| p).unwrap_or_default();
    if group_id.is_empty() {
        return Err(AppError::BadRequest("Group ID is required".to_string()));
    }
    Ok(group_id)
}

fn require_member_ids(path: Option<Path<GroupPath>>) -> Result<(String, String)> {
    let GroupPath { group_id, user_id } = path.map(|Path(p)| p).unwrap_or_default();
    if group_id.is_empty() || user_id.is_empty() {
        return Err(AppError::BadRequest(
            "Both Group ID and User ID are required".to_string(),
        ));
    }
    Ok((group_id, user_id))
}

/// Create a new group
#[utoipa::path(
    post,
    path = "/groups",
    tag = "groups",
    request_body = CreateGroupRequest,
    responses(
        (status = 201, description = "Group created; `data` holds the group", body = crate::group::group_models::Group),
        (status = 400, description = "Invalid request body", body = crate::response::ErrorResponse),
        (status = 500, description = "Failed to create group", body = crate::response::ErrorResponse)
    )
)]
pub async fn create_group(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse> {
    info!(parent: &state.log, "Create group request received");

    let req: CreateGroupRequest = decode_body(&body).map_err(|err| {
        warn!(parent: &state.log, error = %err, "Failed to decode create group request");
        invalid_body()
    })?;

    let group = state.group_service.create_group(&req).await.map_err(|err| {
        error!(parent: &state.log, error = %err, name = %req.name, "Failed to create group");
        service_failure("Failed to create group")
    })?;

    info!(parent: &state.log, group_id = %group.id, name = %group.name, "Group created successfully");
    let message = format!("Group '{}' created successfully", group.name);
    Ok(response::created(message, group))
}

/// List all groups
#[utoipa::path(
    get,
    path = "/groups",
    tag = "groups",
    responses(
        (status = 200, description = "`data` holds the groups", body = Vec<crate::group::group_models::Group>),
        (status = 500, description = "Failed to retrieve groups", body = crate::response::ErrorResponse)
    )
)]
pub async fn get_groups(State(state): State<AppState>) -> Result<impl IntoResponse> {
    info!(parent: &state.log, "Get groups request received");

    let groups = state.group_service.get_groups().await.map_err(|err| {
        error!(parent: &state.log, error = %err, "Failed to get groups");
        service_failure("Failed to retrieve groups")
    })?;

    info!(parent: &state.log, count = groups.len(), "Groups retrieved successfully");
    Ok(response::ok("Success", groups))
}

/// Get a group by ID
#[utoipa::path(
    get,
    path = "/groups/{group_id}",
    tag = "groups",
    params(("group_id" = String, Path, description = "Group ID")),
    responses(
        (status = 200, description = "`data` holds the group", body = crate::group::group_models::Group),
        (status = 400, description = "Group ID is required", body = crate::response::ErrorResponse),
        (status = 500, description = "Failed to retrieve group", body = crate::response::ErrorResponse)
    )
)]
pub async fn get_group(
    State(state): State<AppState>,
    path: Option<Path<GroupPath>>,
) -> Result<impl IntoResponse> {
    let group_id = require_group_id(path)?;
    info!(parent: &state.log, %group_id, "Get group request received");

    let group = state.group_service.get_group(&group_id).await.map_err(|err| {
        error!(parent: &state.log, error = %err, %group_id, "Failed to get group");
        service_failure("Failed to retrieve group")
    })?;

    info!(parent: &state.log, %group_id, "Group retrieved successfully");
    Ok(response::ok("Success", group))
}

/// Update a group
///
/// Whether omitted fields are cleared or kept is up to the service.
#[utoipa::path(
    put,
    path = "/groups/{group_id}",
    tag = "groups",
    params(("group_id" = String, Path, description = "Group ID")),
    request_body = UpdateGroupRequest,
    responses(
        (status = 200, description = "`data` holds the updated group", body = crate::group::group_models::Group),
        (status = 400, description = "Group ID is required / Invalid request body", body = crate::response::ErrorResponse),
        (status = 500, description = "Failed to update group", body = crate::response::ErrorResponse)
    )
)]
pub async fn update_group(
    State(state): State<AppState>,
    path: Option<Path<GroupPath>>,
    body: Bytes,
) -> Result<impl IntoResponse> {
    let group_id = require_group_id(path)?;
    info!(parent: &state.log, %group_id, "Update group request received");

    let req: UpdateGroupRequest = decode_body(&body).map_err(|err| {
        warn!(parent: &state.log, error = %err, "Failed to decode update group request");
        invalid_body()
    })?;

    let group = state
        .group_service
        .update_group(&group_id, &req)
        .await
        .map_err(|err| {
            error!(parent: &state.log, error = %err, %group_id, "Failed to update group");
            service_failure("Failed to update group")
        })?;

    info!(parent: &state.log, %group_id, "Group updated successfully");
    Ok(response::ok("Group updated successfully", group))
}

/// Delete a group
#[utoipa::path(
    delete,
    path = "/groups/{group_id}",
    tag = "groups",
    params(("group_id" = String, Path, description = "Group ID")),
    responses(
        (status = 200, description = "Group deleted successfully"),
        (status = 400, description = "Group ID is required", body = crate::response::ErrorResponse),
        (status = 500, description = "Failed to delete group", body = crate::response::ErrorResponse)
    )
)]
pub async fn delete_group(
    State(state): State<AppState>,
    path: Option<Path<GroupPath>>,
) -> Result<impl IntoResponse> {
    let group_id = require_group_id(path)?;
    info!(parent: &state.log, %group_id, "Delete group request received");

    state.group_service.delete_group(&group_id).await.map_err(|err| {
        error!(parent: &state.log, error = %err, %group_id, "Failed to delete group");
        service_failure("Failed to delete group")
    })?;

    info!(parent: &state.log, %group_id, "Group deleted successfully");
    Ok(response::ok_empty("Group deleted successfully"))
}

/// List the members of a group
#[utoipa::path(
    get,
    path = "/groups/{group_id}/members",
    tag = "groups",
    params(("group_id" = String, Path, description = "Group ID")),
    responses(
        (status = 200, description = "`data` holds the members", body = Vec<crate::group::group_models::GroupMember>),
        (status = 400, description = "Group ID is required", body = crate::response::ErrorResponse),
        (status = 500, description = "Failed to retrieve group members", body = crate::response::ErrorResponse)
    )
)]
pub async fn get_group_members(
    State(state): State<AppState>,
    path: Option<Path<GroupPath>>,
) -> Result<impl IntoResponse> {
    let group_id = require_group_id(path)?;
    info!(parent: &state.log, %group_id, "Get group members request received");

    let members = state
        .group_service
        .get_group_members(&group_id)
        .await
        .map_err(|err| {
            error!(parent: &state.log, error = %err, %group_id, "Failed to get group members");
            service_failure("Failed to retrieve group members")
        })?;

    info!(
        parent: &state.log,
        %group_id,
        member_count = members.len(),
        "Group members retrieved successfully"
    );
    Ok(response::ok("Success", members))
}

/// Add a user to a group
#[utoipa::path(
    put,
    path = "/groups/{group_id}/members/{user_id}",
    tag = "groups",
    params(
        ("group_id" = String, Path, description = "Group ID"),
        ("user_id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User added to group successfully"),
        (status = 400, description = "Both Group ID and User ID are required", body = crate::response::ErrorResponse),
        (status = 500, description = "Failed to add user to group", body = crate::response::ErrorResponse)
    )
)]
pub async fn add_user_to_group(
    State(state): State<AppState>,
    path: Option<Path<GroupPath>>,
) -> Result<impl IntoResponse> {
    let (group_id, user_id) = require_member_ids(path)?;
    info!(parent: &state.log, %group_id, %user_id, "Add user to group request received");

    state
        .group_service
        .add_user_to_group(&group_id, &user_id)
        .await
        .map_err(|err| {
            error!(parent: &state.log, error = %err, %group_id, %user_id, "Failed to add user to group");
            service_failure("Failed to add user to group")
        })?;

    info!(parent: &state.log, %group_id, %user_id, "User added to group successfully");
    Ok(response::ok_empty("User added to group successfully"))
}

/// Remove a user from a group
#[utoipa::path(
    delete,
    path = "/groups/{group_id}/members/{user_id}",
    tag = "groups",
    params(
        ("group_id" = String, Path, description = "Group ID"),
        ("user_id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User removed from group successfully"),
        (status = 400, description = "Both Group ID and User ID are required", body = crate::response::ErrorResponse),
        (status = 500, description = "Failed to remove user from group", body = crate::response::ErrorResponse)
    )
)]
pub async fn remove_user_from_group(
    State(state): State<AppState>,
    path: Option<Path<GroupPath>>,
) -> Result<impl IntoResponse> {
    let (group_id, user_id) = require_member_ids(path)?;
    info!(parent: &state.log, %group_id, %user_id, "Remove user from group request received");

    state
        .group_service
        .remove_user_from_group(&group_id, &user_id)
        .await
        .map_err(|err| {
            error!(parent: &state.log, error = %err, %group_id, %user_id, "Failed to remove user from group");
            service_failure("Failed to remove user from group")
        })?;

    info!(parent: &state.log, %group_id, %user_id, "User removed from group successfully");
    Ok(response::ok_empty("User removed from group successfully"))
}
