//! On-demand status report over a larger block sample

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::classifier::{block_age_seconds, Classification};
use super::types::{BlockSample, Severity};

#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub severity: Severity,
    pub latest_block_number: u64,
    pub latest_block_tx_count: u64,
    pub latest_block_age_seconds: i64,
    pub blocks_analyzed: usize,
    pub empty_blocks: usize,
    pub empty_blocks_percentage: u32,
    pub average_block_time_seconds: f64,
    pub generated_at: DateTime<Utc>,
}

impl StatusReport {
    /// Summarise `sample`. Returns `None` for an empty sample.
    ///
    /// The average block time is the mean of the gaps between consecutive
    /// blocks plus the age of the latest block, so a stalled chain drags the
    /// average up.
    pub fn build(
        sample: &BlockSample,
        classification: &Classification,
        now: DateTime<Utc>,
    ) -> Option<Self> {
        let latest = sample.latest()?;
        let latest_age = block_age_seconds(latest.timestamp, now);

        let mut gaps: Vec<f64> = sample
            .blocks()
            .windows(2)
            .map(|pair| (pair[0].timestamp - pair[1].timestamp).num_milliseconds() as f64 / 1000.0)
            .collect();
        gaps.push(latest_age);
        let average = gaps.iter().sum::<f64>() / gaps.len() as f64;

        let empty_blocks = sample.empty_count();
        let percentage = (empty_blocks as f64 / sample.len() as f64 * 100.0).round() as u32;

        Some(Self {
            severity: classification.severity,
            latest_block_number: latest.number,
            latest_block_tx_count: latest.tx_count,
            latest_block_age_seconds: latest_age.floor() as i64,
            blocks_analyzed: sample.len(),
            empty_blocks,
            empty_blocks_percentage: percentage,
            average_block_time_seconds: (average * 100.0).round() / 100.0,
            generated_at: now,
        })
    }
}
