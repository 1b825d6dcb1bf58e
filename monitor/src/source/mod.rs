//! Block sources
//!
//! The monitor only needs the most recent blocks, newest first. A short
//! result is not an error at this layer; the classifier decides whether it
//! is enough.

pub mod routescan;

pub use routescan::RoutescanSource;

use anyhow::Result;
use async_trait::async_trait;

use crate::status::Block;

#[async_trait]
pub trait BlockSource: Send + Sync {
    /// Fetch up to `limit` blocks, most recent first
    async fn fetch_recent(&self, limit: usize) -> Result<Vec<Block>>;
}
