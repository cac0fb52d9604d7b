pub mod group_dto;
pub mod group_handlers;
pub mod group_models;
pub mod group_repository;
pub mod group_service;

pub use group_dto::{CreateGroupRequest, GroupPath, UpdateGroupRequest};
pub use group_models::{Group, GroupMember};
pub use group_repository::GroupRepository;
pub use group_service::{GroupService, PgGroupService};
