//! Task service: owner-scoped CRUD with pagination.
//!
//! Every operation takes the authenticated user's id and only ever touches
//! tasks owned by that user. Updates and deletes report a missing task and a
//! foreign task identically, so callers cannot probe for the existence of
//! other users' tasks.

use crate::error::{Error, Result};
use crate::storage::{Storage, TaskRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PER_PAGE: u64 = 10;

/// Public view of a task.
#[derive(Debug, Clone, Serialize)]
pub struct TaskView {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub importance: Option<i64>,
    pub category: Option<String>,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TaskRecord> for TaskView {
    fn from(task: TaskRecord) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            importance: task.importance,
            category: task.category,
            owner_id: task.owner_id,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

/// One page of a user's tasks.
#[derive(Debug, Serialize)]
pub struct TaskPage {
    pub tasks: Vec<TaskView>,
    pub total: u64,
    pub pages: u64,
    pub current_page: u64,
}

/// Fields for a new task. `owner_id` is never part of the input; it is set
/// server-side from the authenticated user.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub importance: Option<i64>,
    pub category: Option<String>,
}

/// Partial update. Only these four fields are mutable; anything else in a
/// request body is ignored, so a caller-supplied owner can never override
/// the real one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub importance: Option<i64>,
    pub category: Option<String>,
}

/// Task service.
#[derive(Clone)]
pub struct TaskService {
    storage: Storage,
}

impl TaskService {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// List one page of the user's tasks.
    ///
    /// `page` is 1-indexed; `page`/`per_page` below 1 (or unspecified) fall
    /// back to 1/10. Pages past the end return an empty slice with accurate
    /// totals rather than failing.
    pub async fn list(
        &self,
        owner_id: &str,
        page: Option<u64>,
        per_page: Option<u64>,
    ) -> Result<TaskPage> {
        let page = page.filter(|p| *p >= 1).unwrap_or(DEFAULT_PAGE);
        let per_page = per_page.filter(|p| *p >= 1).unwrap_or(DEFAULT_PER_PAGE);

        let total = self.storage.count_tasks(owner_id).await?;
        let pages = total.div_ceil(per_page);
        // Saturating: an absurd page or per_page lands past the end and
        // yields an empty slice, never a panic or a wrapped offset.
        let offset = page.saturating_sub(1).saturating_mul(per_page);

        let tasks = self
            .storage
            .list_tasks(owner_id, per_page, offset)
            .await?
            .into_iter()
            .map(TaskView::from)
            .collect::<Vec<_>>();

        debug!(owner_id = %owner_id, page, per_page, total, "Listed tasks");

        Ok(TaskPage {
            tasks,
            total,
            pages,
            current_page: page,
        })
    }

    /// Create a task owned by `owner_id`.
    pub async fn create(&self, owner_id: &str, new_task: NewTask) -> Result<TaskView> {
        let title = new_task.title.as_deref().unwrap_or("").trim().to_string();
        if title.is_empty() {
            return Err(Error::Validation("Title is required".to_string()));
        }

        let now = Utc::now();
        let task = TaskRecord {
            id: Uuid::new_v4().to_string(),
            title,
            description: new_task.description,
            importance: new_task.importance,
            category: new_task.category,
            owner_id: owner_id.to_string(),
            created_at: now,
            updated_at: now,
        };

        self.storage.insert_task(&task).await?;

        info!(task_id = %task.id, owner_id = %owner_id, "Created task");

        Ok(task.into())
    }

    /// Apply a partial update to a task the user owns.
    pub async fn update(&self, owner_id: &str, task_id: &str, patch: TaskPatch) -> Result<TaskView> {
        let mut task = self
            .storage
            .find_task(owner_id, task_id)
            .await?
            .ok_or_else(not_found)?;

        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = Some(description);
        }
        if let Some(importance) = patch.importance {
            task.importance = Some(importance);
        }
        if let Some(category) = patch.category {
            task.category = Some(category);
        }
        task.updated_at = Utc::now();

        if !self.storage.update_task(&task).await? {
            return Err(not_found());
        }

        info!(task_id = %task_id, owner_id = %owner_id, "Updated task");

        Ok(task.into())
    }

    /// Permanently remove a task the user owns.
    pub async fn delete(&self, owner_id: &str, task_id: &str) -> Result<()> {
        if !self.storage.delete_task(owner_id, task_id).await? {
            return Err(not_found());
        }

        info!(task_id = %task_id, owner_id = %owner_id, "Deleted task");

        Ok(())
    }
}

/// The one error shape for "absent" and "not yours".
fn not_found() -> Error {
    Error::NotFound("Task not found or unauthorized".to_string())
}
