use sqlx::PgPool;
use uuid::Uuid;

use super::group_models::{Group, GroupMember};

#[derive(Clone)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, name: &str, description: Option<&str>) -> Result<Group, sqlx::Error> {
        sqlx::query_as::<_, Group>(
            "INSERT INTO groups (id, name, description)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(name)
        .bind(description)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn find_all(&self) -> Result<Vec<Group>, sqlx::Error> {
        sqlx::query_as::<_, Group>("SELECT * FROM groups ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn find_by_id(&self, group_id: &str) -> Result<Option<Group>, sqlx::Error> {
        sqlx::query_as::<_, Group>("SELECT * FROM groups WHERE id = $1")
            .bind(group_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Absent fields keep their stored value.
    pub async fn update(
        &self,
        group_id: &str,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Option<Group>, sqlx::Error> {
        sqlx::query_as::<_, Group>(
            "UPDATE groups
             SET name = COALESCE($1, name),
                 description = COALESCE($2, description),
                 updated_at = NOW()
             WHERE id = $3
             RETURNING *",
        )
        .bind(name)
        .bind(description)
        .bind(group_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Returns the number of rows removed.
    pub async fn delete(&self, group_id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(group_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn find_members(&self, group_id: &str) -> Result<Vec<GroupMember>, sqlx::Error> {
        sqlx::query_as::<_, GroupMember>(
            "SELECT group_id, user_id, joined_at FROM group_members
             WHERE group_id = $1
             ORDER BY joined_at ASC",
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Returns the number of rows inserted; 0 when the user is already a member.
    pub async fn add_member(&self, group_id: &str, user_id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO group_members (group_id, user_id)
             VALUES ($1, $2)
             ON CONFLICT (group_id, user_id) DO NOTHING",
        )
        .bind(group_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn remove_member(&self, group_id: &str, user_id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM group_members
             WHERE group_id = $1 AND user_id = $2",
        )
        .bind(group_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
