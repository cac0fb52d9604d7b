//! Shared helpers for the HTTP integration tests.
//!
//! `MockGroupService` stands in for the storage-backed service so the router
//! can be driven with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{TimeZone, Utc};
use serde_json::Value;
use tower::ServiceExt;

use group_api::{
    create_router,
    error::{ServiceError, ServiceResult},
    group::{CreateGroupRequest, Group, GroupMember, GroupService, UpdateGroupRequest},
    AppState,
};

/// One recorded call into the service double.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateGroup(String),
    GetGroups,
    GetGroup(String),
    UpdateGroup(String, Option<String>),
    DeleteGroup(String),
    GetGroupMembers(String),
    AddUserToGroup(String, String),
    RemoveUserFromGroup(String, String),
}

#[derive(Default)]
pub struct MockGroupService {
    pub groups: Mutex<Vec<Group>>,
    pub members: Mutex<Vec<GroupMember>>,
    pub calls: Mutex<Vec<Call>>,
    pub fail: bool,
}

pub fn group(id: &str, name: &str) -> Group {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    Group {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        created_at: at,
        updated_at: at,
    }
}

pub fn member(group_id: &str, user_id: &str) -> GroupMember {
    GroupMember {
        group_id: group_id.to_string(),
        user_id: user_id.to_string(),
        joined_at: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
    }
}

impl MockGroupService {
    pub fn with_groups(groups: Vec<Group>) -> Self {
        Self {
            groups: Mutex::new(groups),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> ServiceResult<()> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            return Err(ServiceError::Other(anyhow::anyhow!("storage unavailable")));
        }
        Ok(())
    }

    fn find(&self, group_id: &str) -> ServiceResult<Group> {
        self.groups
            .lock()
            .unwrap()
            .iter()
            .find(|g| g.id == group_id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(format!("group {group_id}")))
    }
}

#[async_trait]
impl GroupService for MockGroupService {
    async fn create_group(&self, req: &CreateGroupRequest) -> ServiceResult<Group> {
        self.record(Call::CreateGroup(req.name.clone()))?;
        let mut groups = self.groups.lock().unwrap();
        let created = group(&format!("g{}", groups.len() + 1), &req.name);
        groups.push(created.clone());
        Ok(created)
    }

    async fn get_groups(&self) -> ServiceResult<Vec<Group>> {
        self.record(Call::GetGroups)?;
        Ok(self.groups.lock().unwrap().clone())
    }

    async fn get_group(&self, group_id: &str) -> ServiceResult<Group> {
        self.record(Call::GetGroup(group_id.to_string()))?;
        self.find(group_id)
    }

    async fn update_group(&self, group_id: &str, req: &UpdateGroupRequest) -> ServiceResult<Group> {
        self.record(Call::UpdateGroup(group_id.to_string(), req.name.clone()))?;
        let mut groups = self.groups.lock().unwrap();
        let existing = groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or_else(|| ServiceError::NotFound(format!("group {group_id}")))?;
        if let Some(name) = &req.name {
            existing.name = name.clone();
        }
        Ok(existing.clone())
    }

    async fn delete_group(&self, group_id: &str) -> ServiceResult<()> {
        self.record(Call::DeleteGroup(group_id.to_string()))?;
        self.find(group_id)?;
        self.groups.lock().unwrap().retain(|g| g.id != group_id);
        Ok(())
    }

    async fn get_group_members(&self, group_id: &str) -> ServiceResult<Vec<GroupMember>> {
        self.record(Call::GetGroupMembers(group_id.to_string()))?;
        self.find(group_id)?;
        Ok(self
            .members
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.group_id == group_id)
            .cloned()
            .collect())
    }

    async fn add_user_to_group(&self, group_id: &str, user_id: &str) -> ServiceResult<()> {
        self.record(Call::AddUserToGroup(group_id.to_string(), user_id.to_string()))?;
        self.find(group_id)?;
        let mut members = self.members.lock().unwrap();
        if members.iter().any(|m| m.group_id == group_id && m.user_id == user_id) {
            return Err(ServiceError::Conflict("already a member".to_string()));
        }
        members.push(member(group_id, user_id));
        Ok(())
    }

    async fn remove_user_from_group(&self, group_id: &str, user_id: &str) -> ServiceResult<()> {
        self.record(Call::RemoveUserFromGroup(group_id.to_string(), user_id.to_string()))?;
        let mut members = self.members.lock().unwrap();
        let before = members.len();
        members.retain(|m| !(m.group_id == group_id && m.user_id == user_id));
        if members.len() == before {
            return Err(ServiceError::NotFound("membership".to_string()));
        }
        Ok(())
    }
}

/// Router wired to a mock service, plus a handle to inspect it afterwards.
pub struct TestApp {
    pub router: Router,
    pub service: Arc<MockGroupService>,
}

impl TestApp {
    pub fn new(service: MockGroupService) -> Self {
        let service = Arc::new(service);
        let state = AppState::new(tracing::Span::none(), service.clone());
        let router = create_router(state, &["http://localhost:3000".to_string()]);
        Self { router, service }
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(raw) => {
                builder = builder.header("content-type", "application/json");
                Body::from(raw.to_string())
            }
            None => Body::empty(),
        };

        self.send(builder.body(body).unwrap()).await
    }

    /// Sends a raw body with no Content-Type header.
    pub async fn request_without_content_type(
        &self,
        method: &str,
        uri: &str,
        body: &str,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::from(body.to_string()))
            .unwrap();

        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body is not JSON")
        };
        (status, json)
    }
}
