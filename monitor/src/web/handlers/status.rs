// Chain status endpoints

use axum::{extract::State, http::StatusCode, response::Json};
use chrono::Utc;
use tracing::{error, info, warn};

use super::common::{error_response, ApiResponse, ApiResult};
use crate::errors::StatusError;
use crate::status::{classify, BlockSample, MonitorSnapshot, StatusReport};
use crate::web::AppState;

/// Latest view of the polling engine
pub async fn get_monitor_state(State(state): State<AppState>) -> ApiResult<MonitorSnapshot> {
    let snapshot = state.snapshots.borrow().clone();
    Ok(Json(ApiResponse::success(snapshot)))
}

/// Fetch a larger sample and summarise it, independent of the engine state
pub async fn get_status_report(State(state): State<AppState>) -> ApiResult<StatusReport> {
    let limit = state.config.source.report_sample_size;
    info!("Status report requested over {} blocks", limit);

    let blocks = state.source.fetch_recent(limit).await.map_err(|e| {
        error!("Failed to fetch blocks for status report: {}", e);
        error_response(StatusCode::BAD_GATEWAY, format!("Error fetching blocks: {}", e))
    })?;

    let now = Utc::now();
    let sample = BlockSample::new(blocks);
    let classification = classify(
        &sample,
        &state.config.thresholds,
        state.config.source.sample_size,
        now,
    )
    .map_err(|e| {
        warn!("Status report unavailable: {}", e);
        let status = match e {
            StatusError::InsufficientData { .. } => StatusCode::SERVICE_UNAVAILABLE,
            StatusError::InvalidInput { .. } => StatusCode::BAD_GATEWAY,
        };
        error_response(status, e.to_string())
    })?;

    let report = StatusReport::build(&sample, &classification, now).ok_or_else(|| {
        error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "No block data available".to_string(),
        )
    })?;

    Ok(Json(ApiResponse::success(report)))
}
