use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateGroupRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Fields left out keep whatever meaning the service gives them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateGroupRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Path parameters shared by the group routes. Routes that end in an empty
/// segment match without parameters, so both fields default to "".
#[derive(Debug, Default, Deserialize)]
pub struct GroupPath {
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub user_id: String,
}
