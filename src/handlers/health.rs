use axum::extract::State;
use serde_json::{json, Value};

use crate::database::DatabaseManager;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> ApiResult<Value> {
    let database = match &state.pool {
        Some(pool) => {
            DatabaseManager::health_check(pool).await.map_err(|e| {
                tracing::error!("Health check failed: {}", e);
                ApiError::service_unavailable("database unavailable")
            })?;
            "ok"
        }
        None => "in-memory",
    };

    Ok(ApiResponse::success(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
        "database": database,
    })))
}

/// Unmatched routes
pub async fn not_found() -> ApiError {
    ApiError::not_found("no such route")
}
