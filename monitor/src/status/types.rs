//! Chain status types: severities, blocks and per-severity tables

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Chain health classification. Ordered so that `Red > Yellow > Green`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Green,
    Yellow,
    Red,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Green, Severity::Yellow, Severity::Red];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Green => "green",
            Severity::Yellow => "yellow",
            Severity::Red => "red",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value per severity.
///
/// Lookups are exhaustive, so a missing label name or interval for some
/// severity cannot exist at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityTable<T> {
    pub green: T,
    pub yellow: T,
    pub red: T,
}

impl<T> SeverityTable<T> {
    pub fn new(green: T, yellow: T, red: T) -> Self {
        Self { green, yellow, red }
    }

    pub fn get(&self, severity: Severity) -> &T {
        match severity {
            Severity::Green => &self.green,
            Severity::Yellow => &self.yellow,
            Severity::Red => &self.red,
        }
    }

    pub fn map<U, F>(&self, mut f: F) -> SeverityTable<U>
    where
        F: FnMut(&T) -> U,
    {
        SeverityTable {
            green: f(&self.green),
            yellow: f(&self.yellow),
            red: f(&self.red),
        }
    }
}

/// A single block as seen by the classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub number: u64,
    pub timestamp: DateTime<Utc>,
    pub tx_count: u64,
}

/// Blocks ordered most-recent first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockSample {
    blocks: Vec<Block>,
}

impl BlockSample {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn latest(&self) -> Option<&Block> {
        self.blocks.first()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of blocks without any transaction
    pub fn empty_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.tx_count == 0).count()
    }
}

impl From<Vec<Block>> for BlockSample {
    fn from(blocks: Vec<Block>) -> Self {
        Self::new(blocks)
    }
}

/// Classification thresholds, immutable for the lifetime of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub critical_block_age_seconds: u64,
    pub warning_block_age_seconds: u64,
    pub max_empty_blocks: usize,
}
