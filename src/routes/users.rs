use actix_web::{get, post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

use crate::auth::{AuthenticatedUser, PasswordHasher};
use crate::error::AppError;
use crate::models::{RegisterRequest, UserResponse};
use crate::store;

/// Registers a new account.
///
/// The email pre-check covers the common case; the unique constraint on
/// `users.email` backstops concurrent registrations, surfacing as the same
/// conflict response. New accounts start active.
///
/// ## Responses:
/// - `201 Created`: the new user, without any password material.
/// - `400 Bad Request`: the email is already registered.
/// - `422 Unprocessable Entity`: invalid email format or password too short.
#[post("/users/")]
pub async fn register(
    pool: web::Data<PgPool>,
    hasher: web::Data<PasswordHasher>,
    body: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    body.validate()?;

    if store::users::find_by_email(&pool, &body.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let password_hash = hasher.hash(&body.password)?;
    let user = store::users::create(&pool, &body.email, &password_hash).await?;

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Profile of the authenticated user. Mounted under `/users/me`.
#[get("/")]
pub async fn me(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().json(UserResponse {
        id: user.id,
        email: user.email,
        is_active: user.is_active,
    })
}
