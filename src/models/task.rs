use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A task as persisted and as returned by the API.
///
/// `id`, `completed`, `created_at` and `owner_id` are server-assigned at
/// creation; the owner never changes afterwards.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub owner_id: i32,
}

/// Payload for `POST /tasks/`.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// Optional, at most 1000 characters.
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

/// Query parameters for `GET /tasks/`.
#[derive(Debug, Deserialize)]
pub struct TaskListQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl TaskListQuery {
    pub fn offset(&self) -> i64 {
        self.skip.unwrap_or(0).max(0)
    }

    /// Page size, defaulting to 100.
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(100).max(0)
    }
}
