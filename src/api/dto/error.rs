//! Error response DTOs.

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Standard error response format.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[schema(example = json!({
    "code": "DUPLICATE_ENTRY",
    "message": "users.email 'ana@gamedevs.com' already exists",
    "details": { "entity": "users", "field": "email" },
    "request_id": "5f0c6c1e-3d0b-4b8e-9a53-8a3c6e1f2b7d"
}))]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
            request_id: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Adds request ID to the error response for correlation.
    pub fn with_request_id(mut self, request_id: &str) -> Self {
        self.request_id = Some(request_id.to_string());
        self
    }
}
