use sqlx::PgPool;

use crate::error::AppError;
use crate::models::User;

/// Raised when two registrations race past the duplicate-email pre-check;
/// translated to the same conflict the pre-check reports.
const PG_UNIQUE_VIOLATION: &str = "23505";

pub async fn create(pool: &PgPool, email: &str, password_hash: &str) -> Result<User, AppError> {
    let result = sqlx::query_as::<_, User>(
        "INSERT INTO users (email, password_hash, is_active)
         VALUES ($1, $2, TRUE)
         RETURNING id, email, password_hash, is_active",
    )
    .bind(email)
    .bind(password_hash)
    .fetch_one(pool)
    .await;

    match result {
        Ok(user) => Ok(user),
        Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some(PG_UNIQUE_VIOLATION) => {
            Err(AppError::Conflict("Email already registered".into()))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, password_hash, is_active FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
