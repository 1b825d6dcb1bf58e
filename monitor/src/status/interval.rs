//! Poll cadence per severity

use std::time::Duration;

use super::types::{Severity, SeverityTable};

#[derive(Debug, Clone)]
pub struct IntervalScheduler {
    intervals: SeverityTable<Duration>,
}

impl IntervalScheduler {
    pub fn new(intervals: SeverityTable<Duration>) -> Self {
        Self { intervals }
    }

    pub fn next_interval(&self, severity: Severity) -> Duration {
        *self.intervals.get(severity)
    }

    /// Interval used while no valid sample is available
    pub fn fallback_interval(&self) -> Duration {
        self.next_interval(Severity::Red)
    }
}
