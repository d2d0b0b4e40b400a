//! Health check endpoint handlers.
//!
//! Health checks go straight to the connection pool instead of through the
//! service layer.

use std::collections::HashMap;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::Json};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{ComponentHealth, HealthResponse, HealthStatus};
use crate::state::AppState;

/// Creates health check routes.
///
/// # Routes
/// - `GET /health` - Full report
/// - `GET /health/ready` - Readiness probe
/// - `GET /health/live` - Liveness probe
pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health_check))
        .routes(routes!(readiness_check))
        .routes(routes!(liveness_check))
}

/// Returns 503 only when a dependency is unhealthy; degraded still serves.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy or degraded", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse)
    ),
    tag = HEALTH_TAG
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db_check = check_database(&state).await;
    let status = HealthStatus::Healthy.combine(db_check.status);

    let mut checks = HashMap::new();
    checks.insert("database".to_string(), db_check);

    let response = HealthResponse {
        status,
        version: crate::pkg_version().to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        checks,
    };

    let code = match status {
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::OK,
    };
    (code, Json(response))
}

#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "Service is ready"),
        (status = 503, description = "Service is not ready")
    ),
    tag = HEALTH_TAG
)]
pub async fn readiness_check(State(state): State<AppState>) -> StatusCode {
    match check_database(&state).await.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Degraded | HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Lightweight; never touches dependencies.
#[utoipa::path(
    get,
    path = "/health/live",
    responses((status = 200, description = "Service is alive")),
    tag = HEALTH_TAG
)]
pub async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

async fn check_database(state: &AppState) -> ComponentHealth {
    let Some(pool) = state.db_pool.as_ref() else {
        return ComponentHealth {
            status: HealthStatus::Degraded,
            message: Some("No database pool configured".to_string()),
            response_time_ms: None,
        };
    };

    let start_time = Instant::now();
    let elapsed = |start: Instant| Some(start.elapsed().as_millis() as u64);

    match pool.get().await {
        Ok(mut conn) => {
            use diesel_async::RunQueryDsl;

            match diesel::sql_query("SELECT 1").execute(&mut conn).await {
                Ok(_) => ComponentHealth {
                    status: HealthStatus::Healthy,
                    message: Some("Connected".to_string()),
                    response_time_ms: elapsed(start_time),
                },
                Err(e) => ComponentHealth {
                    status: HealthStatus::Unhealthy,
                    message: Some(format!("Query failed: {}", e)),
                    response_time_ms: elapsed(start_time),
                },
            }
        }
        Err(e) => ComponentHealth {
            status: HealthStatus::Unhealthy,
            message: Some(format!("Connection failed: {}", e)),
            response_time_ms: elapsed(start_time),
        },
    }
}
