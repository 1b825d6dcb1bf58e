//! Maps a block sample to a severity

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::types::{BlockSample, Severity, Thresholds};
use crate::errors::StatusError;

/// Outcome of a classification together with the figures it was based on
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub severity: Severity,
    pub block_age_seconds: f64,
    pub empty_blocks: usize,
    pub sample_size: usize,
}

/// Absolute distance between `now` and `timestamp` in seconds.
///
/// Absolute so that a source clock slightly ahead of ours does not produce a
/// negative age.
pub fn block_age_seconds(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - timestamp).num_milliseconds().abs() as f64 / 1000.0
}

/// Classify a sample. Red is checked first and wins; either Yellow condition
/// is sufficient on its own.
pub fn classify(
    sample: &BlockSample,
    thresholds: &Thresholds,
    minimum_sample_size: usize,
    now: DateTime<Utc>,
) -> Result<Classification, StatusError> {
    let latest = match sample.latest() {
        Some(block) if sample.len() >= minimum_sample_size => block,
        _ => {
            return Err(StatusError::InsufficientData {
                received: sample.len(),
                required: minimum_sample_size,
            })
        }
    };

    let age = block_age_seconds(latest.timestamp, now);
    let empty_blocks = sample.empty_count();

    let severity = if age > thresholds.critical_block_age_seconds as f64 {
        Severity::Red
    } else if age > thresholds.warning_block_age_seconds as f64
        || empty_blocks > thresholds.max_empty_blocks
    {
        Severity::Yellow
    } else {
        Severity::Green
    };

    Ok(Classification {
        severity,
        block_age_seconds: age,
        empty_blocks,
        sample_size: sample.len(),
    })
}
