//!
//! # Custom Error Handling
//!
//! This module defines the `AppError` type shared by the model layer. Every failure
//! the entities and credential helpers can produce maps onto one of its variants:
//! rejected input, a broken hashing primitive, or failed authentication.
//!
//! `AppError` implements `actix_web::error::ResponseError` so an API layer can return
//! it straight from a handler and get the right status code with a JSON body.
//! `From` implementations for `validator::ValidationErrors`, `bcrypt::BcryptError`,
//! `jsonwebtoken::errors::Error` and `bson::oid::Error` allow using the `?` operator.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors raised by the model layer.
///
/// None of them is transient: each is a deterministic outcome of the input, so
/// callers should never retry.
#[derive(Debug)]
pub enum AppError {
    /// Authentication failed (HTTP 401).
    /// Deliberately generic: an unknown username and a wrong password look the same.
    Unauthorized(String),
    /// Malformed request data that is not a validation rule, e.g. an unparsable id (HTTP 400).
    BadRequest(String),
    /// A required field is missing or below its minimum length (HTTP 422).
    /// The entity is never constructed.
    ValidationError(String),
    /// The password hashing primitive failed (HTTP 500).
    /// Fatal to the registration attempt; no user is produced.
    HashingError(String),
    /// Any other unexpected server-side failure (HTTP 500), such as missing configuration.
    InternalServerError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::HashingError(msg) => write!(f, "Hashing Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `AppError` variants into `HttpResponse` objects.
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "error": msg
            })),
            AppError::BadRequest(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            AppError::ValidationError(msg) => HttpResponse::UnprocessableEntity().json(json!({
                "error": msg
            })),
            // The hashing failure detail stays in the logs.
            AppError::HashingError(_) => HttpResponse::InternalServerError().json(json!({
                "error": "Failed to process credentials"
            })),
            AppError::InternalServerError(msg) => HttpResponse::InternalServerError().json(json!({
                "error": msg
            })),
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
///
/// The detailed validation messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::HashingError`.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::HashingError(error.to_string())
    }
}

/// Converts `jsonwebtoken::errors::Error` into `AppError::Unauthorized`.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(format!("Invalid token: {}", error))
    }
}

/// Converts a failed object id parse into `AppError::BadRequest`.
impl From<bson::oid::Error> for AppError {
    fn from(error: bson::oid::Error) -> AppError {
        AppError::BadRequest(format!("Invalid identifier: {}", error))
    }
}
