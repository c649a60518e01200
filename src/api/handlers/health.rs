//! Health check endpoint handlers.
//!
//! On the postgres backend the check goes straight to the connection pool
//! and runs `SELECT 1`. The memory backend has nothing external to check.

use std::collections::BTreeMap;
use std::time::Instant;

use axum::{Json, extract::State, http::StatusCode};
use jiff::Timestamp;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{ComponentHealth, HealthResponse, HealthStatus};
use crate::db::AsyncDbPool;
use crate::state::AppState;

/// Creates health check routes.
///
/// # Routes
/// - `GET /` - Health of the service and its storage
/// - `GET /live` - Liveness check
pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health_check))
        .routes(routes!(liveness_check))
}

/// GET /api/health
#[utoipa::path(
    get,
    path = "/",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Storage is unreachable", body = HealthResponse)
    )
)]
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let mut checks = BTreeMap::new();
    checks.insert("storage".to_string(), check_storage(state.db_pool.as_ref()).await);

    let status = HealthResponse::overall_status(&checks);
    let response = HealthResponse {
        status,
        version: crate::pkg_version().to_string(),
        backend: state.backend().as_str().to_string(),
        timestamp: Timestamp::now().to_string(),
        checks,
    };

    let code = match status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => {
            tracing::warn!(backend = %response.backend, "Health check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    };
    (code, Json(response))
}

/// GET /api/health/live
#[utoipa::path(
    get,
    path = "/live",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is alive")
    )
)]
async fn liveness_check() -> StatusCode {
    StatusCode::OK
}

async fn check_storage(pool: Option<&AsyncDbPool>) -> ComponentHealth {
    let start_time = Instant::now();
    let elapsed = || start_time.elapsed().as_millis() as u64;

    let Some(pool) = pool else {
        return ComponentHealth::healthy("In-memory store", elapsed());
    };

    match pool.get().await {
        Ok(mut conn) => {
            use diesel_async::RunQueryDsl;

            match diesel::sql_query("SELECT 1").execute(&mut conn).await {
                Ok(_) => ComponentHealth::healthy("Connected", elapsed()),
                Err(e) => ComponentHealth::unhealthy(format!("Query failed: {}", e), elapsed()),
            }
        }
        Err(e) => ComponentHealth::unhealthy(format!("Connection failed: {}", e), elapsed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness_check() {
        assert_eq!(liveness_check().await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_memory_storage_is_healthy() {
        let health = check_storage(None).await;
        assert_eq!(health.status, HealthStatus::Healthy);
        assert_eq!(health.message.as_deref(), Some("In-memory store"));
    }
}
