//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use blogicum_core::error::{DomainError, FieldErrors, RepoError};
use blogicum_shared::ErrorResponse;
use serde::Serialize;
use std::fmt;

use crate::middleware::flash::{Flash, redirect_with};

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Unauthorized,
    /// Ownership check failed: redirect to `location` with a flash message.
    Denied {
        location: String,
        flash: Flash,
    },
    Conflict(String),
    Internal(String),
    Validation {
        errors: FieldErrors,
        values: Option<serde_json::Value>,
    },
}

impl AppError {
    /// A rejected form, echoing the submitted values.
    pub fn invalid_form(errors: FieldErrors, values: &impl Serialize) -> Self {
        AppError::Validation {
            errors,
            values: serde_json::to_value(values).ok(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::Denied { location, flash } => {
                write!(f, "Denied ({}), redirecting to {}", flash.code(), location)
            }
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::Validation { errors, .. } => write!(f, "Validation errors: {}", errors),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Denied { .. } => StatusCode::SEE_OTHER,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Unauthorized => ErrorResponse::unauthorized(),
            AppError::Denied { location, flash } => return redirect_with(location, *flash),
            AppError::Conflict(detail) => ErrorResponse::conflict(detail),
            AppError::Internal(detail) => {
                // Log internal errors
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
            AppError::Validation { errors, values } => {
                let errors = errors
                    .iter()
                    .map(|(field, messages)| (field.to_string(), messages.to_vec()))
                    .collect();
                let response = ErrorResponse::unprocessable(errors);
                match values {
                    Some(values) => response.with_values(values.clone()),
                    None => response,
                }
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, key } if key.is_empty() => {
                AppError::NotFound(format!("{} not found", entity_type))
            }
            DomainError::NotFound { entity_type, key } => {
                AppError::NotFound(format!("{} {} not found", entity_type, key))
            }
            DomainError::Duplicate(msg) => AppError::Conflict(msg),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => AppError::Conflict(msg),
            RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_mapping() {
        let err = AppError::from(DomainError::not_found("post", 5));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Not found: post 5 not found");
    }

    #[test]
    fn test_constraint_is_conflict() {
        let err = AppError::from(RepoError::Constraint("username".to_string()));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_validation_is_unprocessable() {
        let mut errors = FieldErrors::new();
        errors.add("text", "This field is required.");

        let err = AppError::invalid_form(errors, &serde_json::json!({ "text": "" }));
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
