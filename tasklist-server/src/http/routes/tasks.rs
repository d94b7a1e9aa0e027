//! Task endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{delete, get, patch},
    Json, Router,
};
use serde::Serialize;
use sqlx::PgPool;

use crate::db::TaskRepo;
use crate::http::error::ApiError;
use crate::http::extractors::TaskId;
use crate::models::{NewTask, Task, TaskCreate};
use crate::schema::ensure_schema;
use crate::state::AppState;

/// Delete confirmation
#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
    pub id: i32,
}

/// Pool with the task table guaranteed to exist.
async fn ready_pool(state: &AppState) -> Result<&PgPool, ApiError> {
    let pool = state.engine().handle()?;
    ensure_schema(pool).await?;
    Ok(pool)
}

/// GET /tasks - list all tasks
async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    let pool = ready_pool(&state).await?;
    let tasks = TaskRepo::new(pool).list().await?;
    Ok(Json(tasks))
}

/// POST /tasks - create a task
async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<TaskCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let Json(req) = payload?;
    let new = NewTask::try_from(req)?;

    let pool = ready_pool(&state).await?;
    let task = TaskRepo::new(pool).create(new).await?;

    tracing::info!(id = task.id, "Task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// DELETE /tasks/{id} - delete a task
async fn delete_task(
    State(state): State<AppState>,
    TaskId(id): TaskId,
) -> Result<Json<DeleteResponse>, ApiError> {
    let pool = state.engine().handle()?;
    let deleted = TaskRepo::new(pool).delete(id).await?;

    Ok(Json(DeleteResponse {
        success: true,
        message: format!("Task '{}' deleted", deleted),
        id: deleted,
    }))
}

/// PATCH /tasks/{id}/toggle - flip completion
async fn toggle_task(
    State(state): State<AppState>,
    TaskId(id): TaskId,
) -> Result<Json<Task>, ApiError> {
    let pool = state.engine().handle()?;
    let task = TaskRepo::new(pool).toggle(id).await?;
    Ok(Json(task))
}

/// Task routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", delete(delete_task))
        .route("/tasks/{id}/toggle", patch(toggle_task))
}
