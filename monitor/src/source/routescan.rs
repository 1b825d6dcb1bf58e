//! Block explorer adapter (Routescan-style REST API)

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::BlockSource;
use crate::config::SourceConfig;
use crate::errors::StatusError;
use crate::status::Block;

#[derive(Debug, Deserialize)]
struct BlocksResponse {
    #[serde(default)]
    items: Vec<RawBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBlock {
    number: u64,
    timestamp: String,
    tx_count: i64,
}

impl TryFrom<RawBlock> for Block {
    type Error = StatusError;

    fn try_from(raw: RawBlock) -> Result<Self, Self::Error> {
        let timestamp = DateTime::parse_from_rfc3339(&raw.timestamp)
            .map_err(|e| StatusError::InvalidInput {
                reason: format!("block {} timestamp '{}': {}", raw.number, raw.timestamp, e),
            })?
            .with_timezone(&Utc);

        let tx_count = u64::try_from(raw.tx_count).map_err(|_| StatusError::InvalidInput {
            reason: format!("block {} has negative tx count {}", raw.number, raw.tx_count),
        })?;

        Ok(Block {
            number: raw.number,
            timestamp,
            tx_count,
        })
    }
}

pub struct RoutescanSource {
    client: Client,
    blocks_url: String,
}

impl RoutescanSource {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client for block source: {}", e))?;

        Ok(Self {
            client,
            blocks_url: format!("{}{}", config.base_url.trim_end_matches('/'), config.blocks_endpoint),
        })
    }

    pub fn blocks_url(&self) -> &str {
        &self.blocks_url
    }
}

#[async_trait]
impl BlockSource for RoutescanSource {
    async fn fetch_recent(&self, limit: usize) -> Result<Vec<Block>> {
        debug!("Fetching blocks from {}", self.blocks_url);

        let response = self
            .client
            .get(&self.blocks_url)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to fetch blocks from {}: {}", self.blocks_url, e))?;

        if !response.status().is_success() {
            return Err(anyhow!("Block explorer returned HTTP {}", response.status()));
        }

        let body: BlocksResponse = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse blocks response: {}", e))?;

        let blocks = body
            .items
            .into_iter()
            .take(limit)
            .map(Block::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Fetched {} blocks", blocks.len());
        Ok(blocks)
    }
}
