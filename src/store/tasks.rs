use sqlx::PgPool;

use crate::error::AppError;
use crate::models::Task;

/// Inserts a task for `owner_id`. The database assigns the id, the creation
/// timestamp, and `completed = false`; `RETURNING` reads the persisted row
/// back on the same connection so every server-assigned field is surfaced.
pub async fn create(
    pool: &PgPool,
    title: &str,
    description: Option<&str>,
    owner_id: i32,
) -> Result<Task, AppError> {
    let task = sqlx::query_as::<_, Task>(
        "INSERT INTO tasks (title, description, owner_id)
         VALUES ($1, $2, $3)
         RETURNING id, title, description, completed, created_at, owner_id",
    )
    .bind(title)
    .bind(description)
    .bind(owner_id)
    .fetch_one(pool)
    .await?;

    Ok(task)
}

/// Tasks belonging to `owner_id` in insertion order (serial id), paginated.
pub async fn list_for_owner(
    pool: &PgPool,
    owner_id: i32,
    skip: i64,
    limit: i64,
) -> Result<Vec<Task>, AppError> {
    let tasks = sqlx::query_as::<_, Task>(
        "SELECT id, title, description, completed, created_at, owner_id
         FROM tasks
         WHERE owner_id = $1
         ORDER BY id
         LIMIT $2 OFFSET $3",
    )
    .bind(owner_id)
    .bind(limit)
    .bind(skip)
    .fetch_all(pool)
    .await?;

    Ok(tasks)
}

/// Flips the completed flag in one atomic statement. The owner is part of
/// the predicate: a task owned by someone else counts as zero rows,
/// indistinguishable from a missing task.
pub async fn set_completed(
    pool: &PgPool,
    task_id: i32,
    owner_id: i32,
    completed: bool,
) -> Result<u64, AppError> {
    let result = sqlx::query("UPDATE tasks SET completed = $1 WHERE id = $2 AND owner_id = $3")
        .bind(completed)
        .bind(task_id)
        .bind(owner_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Deletes an owned task; same compound-predicate pattern as
/// [`set_completed`].
pub async fn delete(pool: &PgPool, task_id: i32, owner_id: i32) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner_id = $2")
        .bind(task_id)
        .bind(owner_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
