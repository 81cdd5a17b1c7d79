//!
//! # Custom Error Handling
//!
//! This module defines `AppError`, the error type every handler and service
//! returns. It implements `actix_web::error::ResponseError`, so a failure
//! anywhere in a request ends up as a status code plus a `{"error": ...}`
//! JSON body.
//!
//! Client errors (400/401/404/409) carry a specific, non-sensitive message.
//! Server-side failures (store, upstream AI provider, internal) are logged
//! with their details and answered with a generic message.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::auth::token::TokenError;
use crate::llm::LlmError;
use crate::store::StoreError;

/// Message returned for every token failure, whatever the cause.
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired token";

/// Message returned for a failed login, whether the email or the password was wrong.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// Authentication failed or is missing (HTTP 401).
    Unauthorized(String),
    /// Malformed request, e.g. an unparsable identifier (HTTP 400).
    BadRequest(String),
    /// Missing or invalid input fields (HTTP 400).
    ValidationError(String),
    /// The resource conflicts with an existing one, e.g. a taken email (HTTP 409).
    Conflict(String),
    /// The requested resource does not exist (HTTP 404).
    NotFound(String),
    /// The store was unreachable, timed out, or returned undecodable data (HTTP 500).
    DatabaseError(String),
    /// The AI completion provider failed (HTTP 500).
    UpstreamError(String),
    /// Any other unexpected server-side failure (HTTP 500).
    InternalServerError(String),
}

impl AppError {
    fn is_server_error(&self) -> bool {
        matches!(
            self,
            AppError::DatabaseError(_)
                | AppError::UpstreamError(_)
                | AppError::InternalServerError(_)
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::UpstreamError(msg) => write!(f, "Upstream Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_)
            | AppError::UpstreamError(_)
            | AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.is_server_error() {
            log::error!("{}", self);
        }

        let message = match self {
            AppError::Unauthorized(msg)
            | AppError::BadRequest(msg)
            | AppError::ValidationError(msg)
            | AppError::Conflict(msg)
            | AppError::NotFound(msg) => msg.as_str(),
            AppError::DatabaseError(_) => "Database error",
            AppError::UpstreamError(_) => "AI service unavailable",
            AppError::InternalServerError(_) => "Internal server error",
        };

        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}

/// Field-level validation failures keep their details; they only describe the input.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Every store failure becomes a 500. Callers that give a store error a
/// domain meaning (e.g. a duplicate email) match on it before converting.
impl From<StoreError> for AppError {
    fn from(error: StoreError) -> AppError {
        AppError::DatabaseError(error.to_string())
    }
}

/// Token failures collapse into one message so the caller cannot tell
/// an expired token from a forged one.
impl From<TokenError> for AppError {
    fn from(error: TokenError) -> AppError {
        match error {
            TokenError::Signing(msg) => {
                AppError::InternalServerError(format!("Failed to issue token: {}", msg))
            }
            TokenError::Invalid | TokenError::Expired => {
                AppError::Unauthorized(INVALID_TOKEN_MESSAGE.into())
            }
        }
    }
}

impl From<LlmError> for AppError {
    fn from(error: LlmError) -> AppError {
        AppError::UpstreamError(error.to_string())
    }
}
