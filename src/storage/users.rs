//! User record queries.

use super::Storage;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

/// User database row. The password hash never leaves the service layer.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

fn row_to_user(row: &SqliteRow) -> Result<UserRecord> {
    let created_at: String = row.try_get("created_at")?;
    Ok(UserRecord {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        password_hash: row.try_get("password_hash")?,
        created_at: parse_timestamp(&created_at)?,
    })
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Internal(format!("invalid stored timestamp {raw:?}: {e}")))
}

impl Storage {
    /// Insert a new user. The UNIQUE constraint on `username` is the final
    /// arbiter against concurrent duplicate signups; a violation surfaces as
    /// `Error::Conflict`.
    pub async fn insert_user(&self, user: &UserRecord) -> Result<()> {
        let result = sqlx::query(
            r"
            INSERT INTO users (id, username, password_hash, created_at)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.created_at.to_rfc3339())
        .execute(self.pool())
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                let err = Error::Database(e);
                if err.is_unique_violation() {
                    Err(Error::Conflict("User already exists".to_string()))
                } else {
                    Err(err)
                }
            }
        }
    }

    /// Exact-match lookup by username.
    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        let row = sqlx::query(
            r"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = ?1
            ",
        )
        .bind(username)
        .fetch_optional(self.pool())
        .await?;

        row.as_ref().map(row_to_user).transpose()
    }

    pub async fn find_user_by_id(&self, id: &str) -> Result<Option<UserRecord>> {
        let row = sqlx::query(
            r"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE id = ?1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        row.as_ref().map(row_to_user).transpose()
    }

    /// Delete a user. Owned tasks cascade via the foreign key.
    /// Returns false when no such user exists.
    pub async fn delete_user(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
