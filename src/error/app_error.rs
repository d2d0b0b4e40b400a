use axum::extract::rejection::JsonRejection;
use diesel_async::pooled_connection::PoolError;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::config::ConfigError;
use crate::error::DatabaseErrorConverter;

/// Application-wide error type that represents all possible errors in the system.
///
/// Services return it directly and the HTTP layer maps each variant to a
/// status code, so the variant chosen here is the contract with clients.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found error with entity, field, and value information
    #[error("Resource not found: {entity} with {field}={value}")]
    NotFound {
        entity: String,
        field: String,
        value: String,
    },

    /// Unique constraint violation, surfaced to clients as unprocessable
    #[error("Duplicate entry: {entity}.{field} = '{value}' already exists")]
    Duplicate {
        entity: String,
        field: String,
        value: String,
    },

    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Request body rejected by `validator`
    #[error("Validation failed for {} field(s)", errors.len())]
    ValidationErrors { errors: Vec<ValidationFieldError> },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Database operation error with operation context
    #[error("Database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures
    #[error("Internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

/// A single failed field from request validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ValidationFieldError {
    pub field: String,
    pub message: String,
}

impl AppError {
    pub fn not_found(entity: &str, field: &str, value: impl ToString) -> Self {
        AppError::NotFound {
            entity: entity.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        AppError::Unauthorized {
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        DatabaseErrorConverter::convert_diesel_error(error, "database operation")
    }
}

impl From<bb8::RunError<PoolError>> for AppError {
    fn from(error: bb8::RunError<PoolError>) -> Self {
        AppError::ConnectionPool {
            source: anyhow::Error::new(error),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let key = match &error {
            ConfigError::ValidationError { field, .. } => field.clone(),
            _ => "settings".to_string(),
        };
        AppError::Configuration {
            key,
            source: anyhow::Error::new(error),
        }
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(error: tokio::task::JoinError) -> Self {
        AppError::Internal {
            source: anyhow::Error::new(error),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<ValidationFieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationFieldError {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string()),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::ValidationErrors { errors: fields }
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Signup {
        #[validate(email(message = "Invalid email format"))]
        email: String,
        #[validate(length(min = 1))]
        name: String,
    }

    #[test]
    fn test_validation_errors_collect_every_field() {
        let signup = Signup {
            email: "nope".to_string(),
            name: String::new(),
        };
        let error = AppError::from(signup.validate().unwrap_err());

        match error {
            AppError::ValidationErrors { errors } => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].field, "email");
                assert_eq!(errors[0].message, "Invalid email format");
                assert_eq!(errors[1].field, "name");
                assert_eq!(errors[1].message, "length");
            }
            other => panic!("Expected ValidationErrors, got {:?}", other),
        }
    }

    #[test]
    fn test_not_found_helper_formats_value() {
        let id = uuid::Uuid::nil();
        let error = AppError::not_found("game", "id", id);
        assert_eq!(
            error.to_string(),
            format!("Resource not found: game with id={}", id)
        );
    }

    #[test]
    fn test_anyhow_becomes_internal() {
        let error: AppError = anyhow::anyhow!("boom").into();
        assert!(matches!(error, AppError::Internal { .. }));
    }
}
