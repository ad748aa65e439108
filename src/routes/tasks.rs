use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::models::{TaskInput, TaskListQuery};
use crate::store;

/// Creates a task owned by the authenticated user.
///
/// ## Request Body:
/// - `title`: required, 1 to 200 characters.
/// - `description` (optional): at most 1000 characters.
///
/// ## Responses:
/// - `201 Created`: the persisted `Task`, including the server-assigned id,
///   creation timestamp, and `completed = false`.
/// - `401 Unauthorized`: missing or invalid token.
/// - `422 Unprocessable Entity`: validation failure on the payload.
#[post("/")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    body: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    body.validate()?;

    let task =
        store::tasks::create(&pool, &body.title, body.description.as_deref(), user.id).await?;

    Ok(HttpResponse::Created().json(task))
}

/// Lists the authenticated user's tasks in insertion order.
///
/// ## Query Parameters:
/// - `skip` (optional): number of tasks to skip, default 0.
/// - `limit` (optional): page size, default 100.
#[get("/")]
pub async fn list_tasks(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    query: web::Query<TaskListQuery>,
) -> Result<impl Responder, AppError> {
    let tasks = store::tasks::list_for_owner(&pool, user.id, query.offset(), query.limit()).await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Marks one of the authenticated user's tasks as completed.
///
/// ## Responses:
/// - `204 No Content`: the task was updated.
/// - `404 Not Found`: no such task — or it belongs to someone else, which is
///   reported identically.
#[patch("/{id}/complete")]
pub async fn complete_task(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    task_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    set_completed(&pool, task_id.into_inner(), user.id, true).await
}

/// Marks one of the authenticated user's tasks as not completed.
#[patch("/{id}/incomplete")]
pub async fn incomplete_task(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    task_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    set_completed(&pool, task_id.into_inner(), user.id, false).await
}

async fn set_completed(
    pool: &PgPool,
    task_id: i32,
    owner_id: i32,
    completed: bool,
) -> Result<HttpResponse, AppError> {
    let affected = store::tasks::set_completed(pool, task_id, owner_id, completed).await?;

    if affected == 0 {
        return Err(AppError::NotFound("Task not found or not owned by user".into()));
    }

    Ok(HttpResponse::NoContent().finish())
}

/// Deletes one of the authenticated user's tasks.
///
/// ## Responses:
/// - `204 No Content`: the task was deleted.
/// - `404 Not Found`: no such task, or not owned by the caller.
#[delete("/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    task_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let affected = store::tasks::delete(&pool, task_id.into_inner(), user.id).await?;

    if affected == 0 {
        return Err(AppError::NotFound("Task not found or not owned by user".into()));
    }

    Ok(HttpResponse::NoContent().finish())
}
