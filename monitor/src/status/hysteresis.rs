//! Tracks current/previous severity and decides which changes count as transitions

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::types::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: Severity,
    pub to: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    /// The observed severity differs from the last one recorded
    pub label_changed: bool,
    /// Set only when there was an earlier observation to transition from
    pub transition: Option<Transition>,
}

#[derive(Debug, Clone, Default)]
pub struct HysteresisTracker {
    current: Option<Severity>,
    previous: Option<Severity>,
    last_transition_at: Option<DateTime<Utc>>,
}

impl HysteresisTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Severity> {
        self.current
    }

    pub fn previous(&self) -> Option<Severity> {
        self.previous
    }

    pub fn last_transition_at(&self) -> Option<DateTime<Utc>> {
        self.last_transition_at
    }

    /// Record a new severity and report what changed.
    pub fn observe(&mut self, new: Severity, at: DateTime<Utc>) -> Observation {
        let label_changed = self.current != Some(new);

        let transition = match self.current {
            Some(from) if from != new => Some(Transition { from, to: new }),
            _ => None,
        };

        if transition.is_some() {
            self.last_transition_at = Some(at);
        }

        self.previous = self.current;
        self.current = Some(new);

        Observation {
            label_changed,
            transition,
        }
    }
}
