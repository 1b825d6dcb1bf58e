// Process liveness endpoint

use axum::response::Json;
use serde::Serialize;

use super::common::{ApiResponse, ApiResult};

#[derive(Debug, Serialize)]
pub struct HealthInfo {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health_check() -> ApiResult<HealthInfo> {
    Ok(Json(ApiResponse::success(HealthInfo {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })))
}
