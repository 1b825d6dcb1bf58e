//! Scripted block source
//!
//! Each fetch consumes the next step of the script; once the script runs out
//! the last step repeats. Block timestamps are generated at fetch time so the
//! requested ages hold regardless of how long the test has been running.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use monitor::source::BlockSource;
use monitor::status::Block;

use super::test_data::blocks;

#[derive(Debug, Clone, Copy)]
pub enum SourceStep {
    /// Latest block age in seconds, empty block count, total block count
    Blocks { age: i64, empty: usize, count: usize },
    Fail,
}

impl SourceStep {
    pub fn green() -> Self {
        SourceStep::Blocks { age: 5, empty: 0, count: 11 }
    }

    pub fn yellow() -> Self {
        SourceStep::Blocks { age: 120, empty: 0, count: 11 }
    }

    pub fn red() -> Self {
        SourceStep::Blocks { age: 900, empty: 0, count: 11 }
    }

    pub fn short() -> Self {
        SourceStep::Blocks { age: 5, empty: 0, count: 3 }
    }
}

pub struct ScriptedSource {
    steps: Mutex<VecDeque<SourceStep>>,
    last: Mutex<Option<SourceStep>>,
    fetches: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(steps: impl IntoIterator<Item = SourceStep>) -> Self {
        Self {
            steps: Mutex::new(steps.into_iter().collect()),
            last: Mutex::new(None),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn next_step(&self) -> Option<SourceStep> {
        let next = self.steps.lock().unwrap().pop_front();
        let mut last = self.last.lock().unwrap();
        if let Some(step) = next {
            *last = Some(step);
        }
        *last
    }
}

#[async_trait]
impl BlockSource for ScriptedSource {
    async fn fetch_recent(&self, limit: usize) -> Result<Vec<Block>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match self.next_step() {
            Some(SourceStep::Blocks { age, empty, count }) => {
                let mut result = blocks(age, empty, count);
                result.truncate(limit);
                Ok(result)
            }
            Some(SourceStep::Fail) => Err(anyhow!("explorer unavailable")),
            None => Err(anyhow!("no script configured")),
        }
    }
}
