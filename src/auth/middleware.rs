use std::rc::Rc;

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    web, Error, HttpMessage,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use sqlx::PgPool;

use crate::auth::extractors::AuthenticatedUser;
use crate::auth::token::TokenSigner;
use crate::error::AppError;
use crate::store;

/// Guards a scope: every request must carry a valid bearer token whose
/// subject resolves to an existing, active user. On success the resolved
/// identity is inserted into request extensions for the
/// [`AuthenticatedUser`] extractor.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    // Rc so the future can hold the service across the user lookup await.
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let user = resolve_user(&req).await?;
            req.extensions_mut().insert(user);
            service.call(req).await
        })
    }
}

/// Bearer extraction, token verification, and subject lookup.
///
/// A missing/invalid token and a token whose subject matches no user produce
/// the same 401. An inactive account is reported distinctly: at that point
/// the caller has proven who they are.
async fn resolve_user(req: &ServiceRequest) -> Result<AuthenticatedUser, Error> {
    let signer = req
        .app_data::<web::Data<TokenSigner>>()
        .ok_or_else(|| AppError::InternalServerError("Token signer is not configured".into()))?;
    let pool = req
        .app_data::<web::Data<PgPool>>()
        .ok_or_else(|| AppError::InternalServerError("Database pool is not configured".into()))?;

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Missing bearer token".into()))?;

    let email = signer.verify(token)?;

    let user = store::users::find_by_email(pool.get_ref(), &email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Could not validate credentials".into()))?;

    if !user.is_active {
        return Err(AppError::BadRequest("Inactive user".into()).into());
    }

    Ok(AuthenticatedUser {
        id: user.id,
        email: user.email,
        is_active: user.is_active,
    })
}
