//!
//! # Custom Error Handling
//!
//! Defines the `AppError` type used throughout the application. It
//! centralizes error management and, through the
//! `actix_web::error::ResponseError` impl, converts application errors into
//! HTTP responses with JSON bodies. `From` impls for `sqlx::Error`,
//! `validator::ValidationErrors` and `bcrypt::BcryptError` let handlers and
//! the store propagate with `?`.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// All error conditions the API can report.
#[derive(Debug)]
pub enum AppError {
    /// Authentication failed: missing/invalid/expired token, unknown token
    /// subject, or bad login credentials (HTTP 401). Token failures carry
    /// one uniform message so clients cannot tell the cases apart.
    Unauthorized(String),
    /// A well-formed request the server refuses, e.g. an inactive account
    /// (HTTP 400).
    BadRequest(String),
    /// Registration against an email that is already taken. The public
    /// contract reports this as HTTP 400.
    Conflict(String),
    /// Requested resource absent — or owned by someone else, which is
    /// deliberately reported the same way (HTTP 404).
    NotFound(String),
    /// Unexpected server-side failure (HTTP 500).
    InternalServerError(String),
    /// Error from the database layer (HTTP 500).
    DatabaseError(String),
    /// Request payload failed validation (HTTP 422).
    ValidationError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "error": msg
            })),
            AppError::BadRequest(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            // The registration API pins duplicate emails to 400.
            AppError::Conflict(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "error": msg
            })),
            AppError::InternalServerError(msg) => HttpResponse::InternalServerError().json(json!({
                "error": msg
            })),
            AppError::DatabaseError(msg) => HttpResponse::InternalServerError().json(json!({
                "error": msg
            })),
            AppError::ValidationError(msg) => HttpResponse::UnprocessableEntity().json(json!({
                "error": msg
            })),
        }
    }
}

/// `sqlx::Error::RowNotFound` maps to `NotFound`; everything else is a
/// database error. Unique-constraint violations on registration are handled
/// closer to the insert, where they can be reported as a conflict.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}
