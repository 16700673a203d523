//! 健康检查与指标端点

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use campus_bootstrap::check_readiness;
use campus_errors::AppError;
use serde::Serialize;

use super::{ApiError, ApiResult, AppState};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// 存活检查，不访问依赖
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// 就绪检查：存储不可用时返回 503，缓存不可用只体现在组件状态里
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let result = check_readiness(state.store.as_ref(), state.cache.as_ref()).await;
    let status = if result.healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(result))
}

pub async fn metrics(State(state): State<AppState>) -> ApiResult<String> {
    state
        .metrics
        .as_ref()
        .map(|handle| handle.render())
        .ok_or_else(|| ApiError(AppError::not_found("Metrics recorder not installed")))
}
