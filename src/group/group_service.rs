use async_trait::async_trait;
use validator::Validate;

use crate::error::{ServiceError, ServiceResult};
use super::group_dto::{CreateGroupRequest, UpdateGroupRequest};
use super::group_models::{Group, GroupMember};
use super::group_repository::GroupRepository;

/// Operations the HTTP layer needs from whatever owns group storage.
///
/// Callers cancel an operation by dropping its future.
#[async_trait]
pub trait GroupService: Send + Sync {
    async fn create_group(&self, req: &CreateGroupRequest) -> ServiceResult<Group>;
    async fn get_groups(&self) -> ServiceResult<Vec<Group>>;
    async fn get_group(&self, group_id: &str) -> ServiceResult<Group>;
    async fn update_group(&self, group_id: &str, req: &UpdateGroupRequest) -> ServiceResult<Group>;
    async fn delete_group(&self, group_id: &str) -> ServiceResult<()>;
    async fn get_group_members(&self, group_id: &str) -> ServiceResult<Vec<GroupMember>>;
    async fn add_user_to_group(&self, group_id: &str, user_id: &str) -> ServiceResult<()>;
    async fn remove_user_from_group(&self, group_id: &str, user_id: &str) -> ServiceResult<()>;
}

/// Postgres-backed [`GroupService`].
#[derive(Clone)]
pub struct PgGroupService {
    repo: GroupRepository,
}

impl PgGroupService {
    pub fn new(repo: GroupRepository) -> Self {
        Self { repo }
    }

    async fn ensure_group_exists(&self, group_id: &str) -> ServiceResult<()> {
        if self.repo.find_by_id(group_id).await?.is_none() {
            return Err(group_not_found(group_id));
        }
        Ok(())
    }
}

fn group_not_found(group_id: &str) -> ServiceError {
    ServiceError::NotFound(format!("group {group_id}"))
}

#[async_trait]
impl GroupService for PgGroupService {
    async fn create_group(&self, req: &CreateGroupRequest) -> ServiceResult<Group> {
        req.validate()?;

        let group = self.repo.create(&req.name, req.description.as_deref()).await?;
        Ok(group)
    }

    async fn get_groups(&self) -> ServiceResult<Vec<Group>> {
        Ok(self.repo.find_all().await?)
    }

    async fn get_group(&self, group_id: &str) -> ServiceResult<Group> {
        self.repo
            .find_by_id(group_id)
            .await?
            .ok_or_else(|| group_not_found(group_id))
    }

    async fn update_group(&self, group_id: &str, req: &UpdateGroupRequest) -> ServiceResult<Group> {
        self.repo
            .update(group_id, req.name.as_deref(), req.description.as_deref())
            .await?
            .ok_or_else(|| group_not_found(group_id))
    }

    async fn delete_group(&self, group_id: &str) -> ServiceResult<()> {
        // Memberships go with the group (ON DELETE CASCADE).
        if self.repo.delete(group_id).await? == 0 {
            return Err(group_not_found(group_id));
        }
        Ok(())
    }

    async fn get_group_members(&self, group_id: &str) -> ServiceResult<Vec<GroupMember>> {
        self.ensure_group_exists(group_id).await?;
        Ok(self.repo.find_members(group_id).await?)
    }

    async fn add_user_to_group(&self, group_id: &str, user_id: &str) -> ServiceResult<()> {
        self.ensure_group_exists(group_id).await?;

        if self.repo.add_member(group_id, user_id).await? == 0 {
            return Err(ServiceError::Conflict(format!(
                "user {user_id} is already a member of group {group_id}"
            )));
        }
        Ok(())
    }

    async fn remove_user_from_group(&self, group_id: &str, user_id: &str) -> ServiceResult<()> {
        self.ensure_group_exists(group_id).await?;

        if self.repo.remove_member(group_id, user_id).await? == 0 {
            return Err(ServiceError::NotFound(format!(
                "user {user_id} in group {group_id}"
            )));
        }
        Ok(())
    }
}
