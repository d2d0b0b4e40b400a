//! Error handler for converting AppError to HTTP responses.
//!
//! The rendered `ErrorResponse` is also stored in the response extensions
//! so `request_id_middleware` can stamp the request ID into the body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

/// Maps an AppError variant to its corresponding HTTP status code.
///
/// Unique-constraint conflicts are unprocessable (422), not 409.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Duplicate { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        AppError::Validation { .. } | AppError::ValidationErrors { .. } => StatusCode::BAD_REQUEST,
        AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        AppError::Database { .. } | AppError::Configuration { .. } | AppError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
    }
}

pub fn error_to_code(error: &AppError) -> &'static str {
    match error {
        AppError::NotFound { .. } => "NOT_FOUND",
        AppError::Duplicate { .. } => "DUPLICATE_ENTRY",
        AppError::Validation { .. } | AppError::ValidationErrors { .. } => "VALIDATION_ERROR",
        AppError::BadRequest { .. } => "BAD_REQUEST",
        AppError::Unauthorized { .. } => "UNAUTHORIZED",
        AppError::Database { .. } => "DATABASE_ERROR",
        AppError::Configuration { .. } => "CONFIGURATION_ERROR",
        AppError::ConnectionPool { .. } => "SERVICE_UNAVAILABLE",
        AppError::Internal { .. } => "INTERNAL_ERROR",
    }
}

/// Builds the client-facing body. Server-side failures are sanitized.
fn error_body(error: &AppError) -> ErrorResponse {
    let code = error_to_code(error);
    match error {
        AppError::NotFound { entity, field, value } => ErrorResponse::new(
            code,
            format!("{} with {} '{}' not found", entity, field, value),
        )
        .with_details(json!({ "entity": entity, "field": field, "value": value })),
        AppError::Duplicate { entity, field, value } => ErrorResponse::new(
            code,
            format!("{}.{} '{}' already exists", entity, field, value),
        )
        .with_details(json!({ "entity": entity, "field": field })),
        AppError::Validation { field, reason } => {
            ErrorResponse::new(code, reason.clone()).with_details(json!({ "field": field }))
        }
        AppError::ValidationErrors { errors } => {
            ErrorResponse::new(code, "Request validation failed").with_details(json!(errors))
        }
        AppError::BadRequest { message } | AppError::Unauthorized { message } => {
            ErrorResponse::new(code, message.clone())
        }
        AppError::Database { operation, .. } => ErrorResponse::new(
            code,
            format!("Database operation failed: {}", operation),
        ),
        AppError::Configuration { key, .. } => {
            ErrorResponse::new(code, format!("Configuration error: {}", key))
        }
        AppError::ConnectionPool { .. } => {
            ErrorResponse::new(code, "Database connection unavailable")
        }
        AppError::Internal { .. } => ErrorResponse::new(code, "An internal error occurred"),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);
        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let body = error_body(&self);
        let mut response = (status, Json(body.clone())).into_response();
        response.extensions_mut().insert(body);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationFieldError;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::not_found("game", "id", 1), StatusCode::NOT_FOUND),
            (
                AppError::Duplicate {
                    entity: "users".to_string(),
                    field: "email".to_string(),
                    value: "a@b.com".to_string(),
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::Validation {
                    field: "gender_id".to_string(),
                    reason: "missing".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (AppError::unauthorized("not authorized"), StatusCode::UNAUTHORIZED),
            (
                AppError::ConnectionPool {
                    source: anyhow::anyhow!("timeout"),
                },
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::Internal {
                    source: anyhow::anyhow!("boom"),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error_to_status_code(&error), status, "{:?}", error);
        }
    }

    #[tokio::test]
    async fn test_duplicate_body() {
        let response = AppError::Duplicate {
            entity: "users".to_string(),
            field: "cpf".to_string(),
            value: "111".to_string(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(response.extensions().get::<ErrorResponse>().is_some());
        let body = body_json(response).await;
        assert_eq!(body["code"], "DUPLICATE_ENTRY");
        assert_eq!(body["details"]["field"], "cpf");
    }

    #[tokio::test]
    async fn test_validation_errors_listed_in_details() {
        let response = AppError::ValidationErrors {
            errors: vec![ValidationFieldError {
                field: "email".to_string(),
                message: "Invalid email format".to_string(),
            }],
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["details"][0]["field"], "email");
        assert_eq!(body["details"][0]["message"], "Invalid email format");
    }

    #[tokio::test]
    async fn test_internal_error_is_sanitized() {
        let response = AppError::Database {
            operation: "select users".to_string(),
            source: anyhow::anyhow!("password=hunter2 leaked in driver message"),
        }
        .into_response();

        let body = body_json(response).await;
        assert!(!body.to_string().contains("hunter2"));
        assert_eq!(body["code"], "DATABASE_ERROR");
    }
}
