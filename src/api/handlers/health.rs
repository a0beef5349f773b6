//! Handler for the health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{
    ComponentCheck, ComponentStatus, HealthChecks, HealthResponse, ServiceStatus,
};
use crate::state::AppState;

/// Reports whether the URL entry store answers.
///
/// # Endpoint
///
/// `GET /health`
///
/// Responds `200 OK` with `"status": "healthy"`, or `503 Service
/// Unavailable` with `"status": "degraded"` when the store probe fails:
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": { "storage": { "status": "ok" } }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let storage = match state.allocation_service.health_check().await {
        Ok(()) => ComponentCheck {
            status: ComponentStatus::Ok,
            message: None,
        },
        Err(err) => {
            tracing::error!(error = %err, "Storage health check failed");
            ComponentCheck {
                status: ComponentStatus::Error,
                message: Some(err.to_string()),
            }
        }
    };

    let (code, status) = match storage.status {
        ComponentStatus::Ok => (StatusCode::OK, ServiceStatus::Healthy),
        ComponentStatus::Error => (StatusCode::SERVICE_UNAVAILABLE, ServiceStatus::Degraded),
    };

    let response = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        checks: HealthChecks { storage },
    };

    (code, Json(response))
}
