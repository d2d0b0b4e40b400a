//! Health check DTOs for API responses.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Aggregated health report.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "status": "healthy",
    "version": "0.1.0",
    "timestamp": "2025-01-10T12:00:00.000Z",
    "checks": {
        "database": {
            "status": "healthy",
            "message": "Connected",
            "response_time_ms": 5
        }
    }
}))]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    /// Timestamp of the health check (RFC 3339)
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: String,
    pub checks: HashMap<String, ComponentHealth>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    /// Serving, but a dependency is missing or slow
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    /// The worse of two statuses.
    pub fn combine(self, other: HealthStatus) -> HealthStatus {
        use HealthStatus::*;
        match (self, other) {
            (Unhealthy, _) | (_, Unhealthy) => Unhealthy,
            (Degraded, _) | (_, Degraded) => Degraded,
            _ => Healthy,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComponentHealth {
    pub status: HealthStatus,
    pub message: Option<String>,
    pub response_time_ms: Option<u64>,
}
