//! Common test data builders

use chrono::{DateTime, Duration, Utc};
use monitor::status::{Block, Thresholds};
use serde_json::{json, Value};

/// Seconds between consecutive generated blocks
pub const BLOCK_GAP_SECONDS: i64 = 5;

/// `count` blocks, newest first, the latest `latest_age_secs` old.
/// The first `empty` blocks carry no transactions.
pub fn blocks_at(
    now: DateTime<Utc>,
    latest_age_secs: i64,
    empty: usize,
    count: usize,
) -> Vec<Block> {
    (0..count)
        .map(|i| Block {
            number: 1_000 - i as u64,
            timestamp: now
                - Duration::seconds(latest_age_secs + i as i64 * BLOCK_GAP_SECONDS),
            tx_count: if i < empty { 0 } else { 3 },
        })
        .collect()
}

pub fn blocks(latest_age_secs: i64, empty: usize, count: usize) -> Vec<Block> {
    blocks_at(Utc::now(), latest_age_secs, empty, count)
}

/// Blocks in the explorer's wire format
pub fn explorer_items(blocks: &[Block]) -> Value {
    let items: Vec<Value> = blocks
        .iter()
        .map(|b| {
            json!({
                "number": b.number,
                "timestamp": b.timestamp.to_rfc3339(),
                "txCount": b.tx_count,
            })
        })
        .collect();
    json!({ "items": items })
}

pub fn default_thresholds() -> Thresholds {
    Thresholds {
        critical_block_age_seconds: 600,
        warning_block_age_seconds: 60,
        max_empty_blocks: 8,
    }
}
