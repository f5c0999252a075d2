//! Error handling - RFC 7807 compliant responses.
//!
//! Status mapping intentionally follows the observed contract: validation,
//! duplicates, handler-level unauthorized, and already-deleted all answer
//! 400; self-reference and follow-state outcomes answer 403; internal
//! failures collapse to a detail-free 500.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use sogram_shared::ErrorResponse;
use std::fmt;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    Duplicate(String),
    Unauthorized(String),
    SelfReference(String),
    FollowState(String),
    AlreadyDeleted(String),
    NotFound(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation failed: {}", msg),
            AppError::Duplicate(msg) => write!(f, "Duplicate account: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::SelfReference(msg) => write!(f, "Self reference: {}", msg),
            AppError::FollowState(msg) => write!(f, "Follow state: {}", msg),
            AppError::AlreadyDeleted(msg) => write!(f, "Already deleted: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Duplicate(_) => StatusCode::BAD_REQUEST,
            // The observed contract answers 400 here, not 401; the cookie
            // extractor is where 401 happens.
            AppError::Unauthorized(_) => StatusCode::BAD_REQUEST,
            AppError::SelfReference(_) => StatusCode::FORBIDDEN,
            AppError::FollowState(_) => StatusCode::FORBIDDEN,
            AppError::AlreadyDeleted(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::Validation(detail) => ErrorResponse::bad_request(detail),
            AppError::Duplicate(detail) => {
                ErrorResponse::new(400, "Duplicate Account").with_detail(detail)
            }
            AppError::Unauthorized(detail) => {
                ErrorResponse::new(400, "Unauthorized").with_detail(detail)
            }
            AppError::SelfReference(detail) => ErrorResponse::forbidden().with_detail(detail),
            AppError::FollowState(detail) => ErrorResponse::forbidden().with_detail(detail),
            AppError::AlreadyDeleted(detail) => {
                ErrorResponse::new(400, "Already Deleted").with_detail(detail)
            }
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::Internal(detail) => {
                // Log internal errors; the response carries no detail
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<sogram_core::error::RepoError> for AppError {
    fn from(err: sogram_core::error::RepoError) -> Self {
        match err {
            sogram_core::error::RepoError::NotFound => {
                AppError::NotFound("Resource not found".to_string())
            }
            sogram_core::error::RepoError::Query(msg) => {
                tracing::error!("Store query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

impl From<sogram_core::ports::AuthError> for AppError {
    fn from(err: sogram_core::ports::AuthError) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
