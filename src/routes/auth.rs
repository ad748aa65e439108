use actix_web::{post, web, HttpResponse, Responder};
use sqlx::PgPool;

use crate::auth::{PasswordHasher, TokenRequest, TokenResponse, TokenSigner};
use crate::error::AppError;
use crate::store;

/// OAuth2-style password login.
///
/// Accepts a urlencoded form whose `username` field carries the email. An
/// unknown email and a wrong password produce the same 401 response.
#[post("/token")]
pub async fn issue_token(
    pool: web::Data<PgPool>,
    signer: web::Data<TokenSigner>,
    hasher: web::Data<PasswordHasher>,
    form: web::Form<TokenRequest>,
) -> Result<impl Responder, AppError> {
    let user = store::users::find_by_email(&pool, &form.username).await?;

    let user = match user {
        Some(user) if hasher.verify(&form.password, &user.password_hash) => user,
        _ => return Err(AppError::Unauthorized("Incorrect email or password".into())),
    };

    let token = signer.issue(&user.email)?;

    Ok(HttpResponse::Ok().json(TokenResponse::bearer(token)))
}
