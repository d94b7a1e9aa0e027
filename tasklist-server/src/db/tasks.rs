//! Task repository
//!
//! Every operation checks out one pooled connection and returns it on drop,
//! whichever way the call exits. Writes are single statements in autocommit
//! mode, so each one is atomic on its own.

use chrono::Utc;
use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};
use crate::models::{NewTask, Task};

const TASK_COLUMNS: &str = r#"id, title, description, "isCompleted", created_at"#;

/// Task repository
pub struct TaskRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> TaskRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every task, oldest id first.
    pub async fn list(&self) -> StoreResult<Vec<Task>> {
        let mut conn = self.pool.acquire().await?;
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM task ORDER BY id"
        ))
        .fetch_all(&mut *conn)
        .await?;

        tracing::debug!(count = tasks.len(), "Listed tasks");
        Ok(tasks)
    }

    /// Insert a task, not completed, stamped with the current UTC time.
    pub async fn create(&self, new: NewTask) -> StoreResult<Task> {
        let mut conn = self.pool.acquire().await?;
        let task = sqlx::query_as::<_, Task>(&format!(
            r#"INSERT INTO task (title, description, "isCompleted", created_at)
               VALUES ($1, $2, FALSE, $3)
               RETURNING {TASK_COLUMNS}"#
        ))
        .bind(new.title.as_str())
        .bind(new.description.as_str())
        .bind(Utc::now())
        .fetch_one(&mut *conn)
        .await?;

        tracing::debug!(id = task.id, "Created task");
        Ok(task)
    }

    /// Get a single task by id.
    pub async fn get(&self, id: i32) -> StoreResult<Task> {
        let mut conn = self.pool.acquire().await?;
        let task = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM task WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        task.ok_or(StoreError::NotFound { id })
    }

    /// Delete a task, returning the id that was removed.
    pub async fn delete(&self, id: i32) -> StoreResult<i32> {
        let mut conn = self.pool.acquire().await?;
        let deleted: Option<(i32,)> = sqlx::query_as("DELETE FROM task WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        let (deleted,) = deleted.ok_or(StoreError::NotFound { id })?;
        tracing::debug!(id = deleted, "Deleted task");
        Ok(deleted)
    }

    /// Flip `isCompleted` and return the updated row.
    pub async fn toggle(&self, id: i32) -> StoreResult<Task> {
        let mut conn = self.pool.acquire().await?;
        let task = sqlx::query_as::<_, Task>(&format!(
            r#"UPDATE task SET "isCompleted" = NOT "isCompleted"
               WHERE id = $1
               RETURNING {TASK_COLUMNS}"#
        ))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(StoreError::NotFound { id })?;

        tracing::debug!(id, completed = task.is_completed, "Toggled task");
        Ok(task)
    }

    /// Number of rows in the table.
    pub async fn count(&self) -> StoreResult<i64> {
        let mut conn = self.pool.acquire().await?;
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM task")
            .fetch_one(&mut *conn)
            .await?;
        Ok(count)
    }
}
