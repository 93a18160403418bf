//! Task CRUD endpoints. All routes sit behind the auth middleware; every
//! operation is scoped to the authenticated user.

use crate::api::error::ApiError;
use crate::api::extract::Json;
use crate::api::middleware::CurrentUser;
use crate::services::{NewTask, TaskPage, TaskPatch, TaskService, TaskView};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
    Router,
};
use serde::Deserialize;

/// Pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct TaskListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

/// GET /tasks - One page of the caller's tasks
async fn list_tasks(
    State(service): State<TaskService>,
    current: CurrentUser,
    Query(params): Query<TaskListQuery>,
) -> Result<Json<TaskPage>, ApiError> {
    let page = service.list(&current.id, params.page, params.per_page).await?;
    Ok(Json(page))
}

/// POST /tasks - Create a task owned by the caller
async fn create_task(
    State(service): State<TaskService>,
    current: CurrentUser,
    Json(payload): Json<NewTask>,
) -> Result<impl IntoResponse, ApiError> {
    let task: TaskView = service.create(&current.id, payload).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PATCH /tasks/{id} - Partially update one of the caller's tasks
async fn update_task(
    State(service): State<TaskService>,
    current: CurrentUser,
    Path(task_id): Path<String>,
    Json(payload): Json<TaskPatch>,
) -> Result<Json<TaskView>, ApiError> {
    let task = service.update(&current.id, &task_id, payload).await?;
    Ok(Json(task))
}

/// DELETE /tasks/{id} - Permanently remove one of the caller's tasks
async fn delete_task(
    State(service): State<TaskService>,
    current: CurrentUser,
    Path(task_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.delete(&current.id, &task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create task routes; mounted behind the auth middleware.
pub fn task_routes(service: TaskService) -> Router {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", patch(update_task).delete(delete_task))
        .with_state(service)
}
