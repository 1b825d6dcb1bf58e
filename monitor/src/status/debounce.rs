//! Debounced alerting.
//!
//! A transition does not produce an alert immediately. It arms a single
//! pending entry that fires once the debounce window elapses. Any further
//! transition inside the window either replaces the entry (restarting the
//! window) or, if the status reverted to what was last published, drops it.
//!
//! ```text
//!            to != last_published
//!   Idle ─────────────────────────► Pending ──┐ to != last_published
//!    ▲                                 │  ▲    │ (replace, restart window)
//!    │  to == last_published (cancel)  │  └────┘
//!    ├─────────────────────────────────┤
//!    │      deadline elapsed (fire)    │
//!    └─────────────────────────────────┘
//! ```
//!
//! The state machine takes `now` as an argument and never reads a clock, so
//! the driver decides how time passes.

use std::time::Duration;
use tokio::time::Instant;

use super::types::Severity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingAlert {
    pub severity: Severity,
    pub deadline: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceDecision {
    /// A pending alert was armed; `replaced` is the severity it superseded
    Armed {
        severity: Severity,
        deadline: Instant,
        replaced: Option<Severity>,
    },
    /// The status reverted to the last published one before the window elapsed
    Cancelled { severity: Severity },
    /// Nothing pending and nothing new to announce
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct NotificationDebouncer {
    window: Duration,
    pending: Option<PendingAlert>,
    last_published: Option<Severity>,
}

impl NotificationDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
            last_published: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn pending(&self) -> Option<PendingAlert> {
        self.pending
    }

    pub fn last_published(&self) -> Option<Severity> {
        self.last_published
    }

    /// The single live deadline, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.deadline)
    }

    /// Seed `last_published` with the first observed severity so that startup
    /// never produces an alert. Later calls are ignored.
    pub fn prime(&mut self, severity: Severity) -> bool {
        if self.last_published.is_none() {
            self.last_published = Some(severity);
            true
        } else {
            false
        }
    }

    pub fn on_transition(&mut self, to: Severity, now: Instant) -> DebounceDecision {
        if Some(to) == self.last_published {
            return match self.pending.take() {
                Some(dropped) => DebounceDecision::Cancelled {
                    severity: dropped.severity,
                },
                None => DebounceDecision::Unchanged,
            };
        }

        let deadline = now + self.window;
        let replaced = self
            .pending
            .replace(PendingAlert {
                severity: to,
                deadline,
            })
            .map(|p| p.severity);

        DebounceDecision::Armed {
            severity: to,
            deadline,
            replaced,
        }
    }

    /// Settle the pending entry once its deadline has passed.
    ///
    /// Returns the severity to announce, already recorded as published.
    pub fn fire(&mut self, now: Instant) -> Option<Severity> {
        let pending = self.pending?;
        if now < pending.deadline {
            return None;
        }
        self.pending = None;

        if Some(pending.severity) == self.last_published {
            return None;
        }
        self.last_published = Some(pending.severity);
        Some(pending.severity)
    }
}
