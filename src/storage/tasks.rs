//! Task record queries. Every read and write is scoped by `owner_id`.

use super::users::parse_timestamp;
use super::Storage;
use crate::error::Result;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

/// Task database row.
#[derive(Debug, Clone)]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub importance: Option<i64>,
    pub category: Option<String>,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn row_to_task(row: &SqliteRow) -> Result<TaskRecord> {
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;
    Ok(TaskRecord {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        importance: row.try_get("importance")?,
        category: row.try_get("category")?,
        owner_id: row.try_get("owner_id")?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

impl Storage {
    pub async fn insert_task(&self, task: &TaskRecord) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO tasks (id, title, description, importance, category,
                               owner_id, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ",
        )
        .bind(&task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.importance)
        .bind(&task.category)
        .bind(&task.owner_id)
        .bind(task.created_at.to_rfc3339())
        .bind(task.updated_at.to_rfc3339())
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Number of tasks owned by `owner_id`.
    pub async fn count_tasks(&self, owner_id: &str) -> Result<u64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM tasks WHERE owner_id = ?1")
            .bind(owner_id)
            .fetch_one(self.pool())
            .await?;

        let n: i64 = row.try_get("n")?;
        Ok(n as u64)
    }

    /// One page of tasks owned by `owner_id`, oldest first.
    pub async fn list_tasks(&self, owner_id: &str, limit: u64, offset: u64) -> Result<Vec<TaskRecord>> {
        let rows = sqlx::query(
            r"
            SELECT id, title, description, importance, category,
                   owner_id, created_at, updated_at
            FROM tasks
            WHERE owner_id = ?1
            ORDER BY created_at ASC, id ASC
            LIMIT ?2 OFFSET ?3
            ",
        )
        .bind(owner_id)
        // Clamped: a cast that wrapped negative would read as "no LIMIT"
        // (or "no OFFSET") in SQLite.
        .bind(limit.min(i64::MAX as u64) as i64)
        .bind(offset.min(i64::MAX as u64) as i64)
        .fetch_all(self.pool())
        .await?;

        rows.iter().map(row_to_task).collect()
    }

    /// Owner-scoped single-task lookup. A task belonging to another user is
    /// indistinguishable from one that does not exist.
    pub async fn find_task(&self, owner_id: &str, task_id: &str) -> Result<Option<TaskRecord>> {
        let row = sqlx::query(
            r"
            SELECT id, title, description, importance, category,
                   owner_id, created_at, updated_at
            FROM tasks
            WHERE id = ?1 AND owner_id = ?2
            ",
        )
        .bind(task_id)
        .bind(owner_id)
        .fetch_optional(self.pool())
        .await?;

        row.as_ref().map(row_to_task).transpose()
    }

    /// Persist updated task fields. The WHERE clause re-checks ownership so a
    /// stale record can never cross user boundaries.
    pub async fn update_task(&self, task: &TaskRecord) -> Result<bool> {
        let result = sqlx::query(
            r"
            UPDATE tasks
            SET title = ?1, description = ?2, importance = ?3, category = ?4,
                updated_at = ?5
            WHERE id = ?6 AND owner_id = ?7
            ",
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.importance)
        .bind(&task.category)
        .bind(task.updated_at.to_rfc3339())
        .bind(&task.id)
        .bind(&task.owner_id)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Owner-scoped delete. Returns false when the task is absent or owned by
    /// someone else.
    pub async fn delete_task(&self, owner_id: &str, task_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?1 AND owner_id = ?2")
            .bind(task_id)
            .bind(owner_id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
