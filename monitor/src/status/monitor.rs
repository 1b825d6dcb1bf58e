//! The polling engine.
//!
//! A single task owns every piece of mutable state: the hysteresis tracker,
//! the debouncer and the last classification. It waits on three things at
//! once (the next poll, the pending alert deadline and shutdown) so polls and
//! alert firing never interleave and no locking is needed. Readers observe
//! progress through a `watch` channel of [`MonitorSnapshot`]s.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

use super::classifier::{classify, Classification};
use super::debounce::{DebounceDecision, NotificationDebouncer};
use super::hysteresis::HysteresisTracker;
use super::interval::IntervalScheduler;
use super::types::{BlockSample, Severity, SeverityTable, Thresholds};
use crate::config::Config;
use crate::services::{AlertService, LabelService};
use crate::source::BlockSource;

#[derive(Debug, Clone)]
pub struct MonitorSettings {
    pub thresholds: Thresholds,
    pub minimum_sample_size: usize,
    pub intervals: SeverityTable<Duration>,
    pub debounce_window: Duration,
}

impl MonitorSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            thresholds: config.thresholds.clone(),
            minimum_sample_size: config.source.sample_size,
            intervals: config.poll_intervals(),
            debounce_window: config.debounce_window(),
        }
    }
}

/// Read-only view of the engine, published after every cycle and alert
#[derive(Debug, Clone, Default, Serialize)]
pub struct MonitorSnapshot {
    pub current: Option<Severity>,
    pub previous: Option<Severity>,
    pub last_published: Option<Severity>,
    pub pending: Option<Severity>,
    pub pending_fires_in_seconds: Option<u64>,
    pub last_transition_at: Option<DateTime<Utc>>,
    pub last_check_at: Option<DateTime<Utc>>,
    pub last_classification: Option<Classification>,
    pub last_error: Option<String>,
    pub next_check_in_seconds: u64,
    pub cycles: u64,
    pub alerts_sent: u64,
}

#[derive(Debug)]
struct MonitorState {
    tracker: HysteresisTracker,
    debouncer: NotificationDebouncer,
    last_classification: Option<Classification>,
    last_check_at: Option<DateTime<Utc>>,
    last_error: Option<String>,
    cycles: u64,
    alerts_sent: u64,
}

pub struct StatusMonitor {
    source: Arc<dyn BlockSource>,
    labels: LabelService,
    alerts: AlertService,
    thresholds: Thresholds,
    minimum_sample_size: usize,
    scheduler: IntervalScheduler,
    state: MonitorState,
    snapshot_tx: watch::Sender<MonitorSnapshot>,
}

impl StatusMonitor {
    pub fn new(
        source: Arc<dyn BlockSource>,
        labels: LabelService,
        alerts: AlertService,
        settings: MonitorSettings,
    ) -> Self {
        let (snapshot_tx, _) = watch::channel(MonitorSnapshot::default());
        Self {
            source,
            labels,
            alerts,
            thresholds: settings.thresholds,
            minimum_sample_size: settings.minimum_sample_size,
            scheduler: IntervalScheduler::new(settings.intervals),
            state: MonitorState {
                tracker: HysteresisTracker::new(),
                debouncer: NotificationDebouncer::new(settings.debounce_window),
                last_classification: None,
                last_check_at: None,
                last_error: None,
                cycles: 0,
                alerts_sent: 0,
            },
            snapshot_tx,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<MonitorSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn current(&self) -> Option<Severity> {
        self.state.tracker.current()
    }

    pub fn last_published(&self) -> Option<Severity> {
        self.state.debouncer.last_published()
    }

    pub fn pending(&self) -> Option<Severity> {
        self.state.debouncer.pending().map(|p| p.severity)
    }

    /// Run until `shutdown` flips to true or its sender is dropped
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!(
            "Status monitor started: sample size {}, debounce window {}s",
            self.minimum_sample_size,
            self.state.debouncer.window().as_secs()
        );

        loop {
            if *shutdown.borrow() {
                break;
            }

            let interval = self.run_cycle().await;
            let next_poll = Instant::now() + interval;

            loop {
                let deadline = self.state.debouncer.deadline();
                tokio::select! {
                    _ = time::sleep_until(next_poll) => break,
                    _ = wait_for(deadline) => {
                        self.fire_pending().await;
                        self.publish_snapshot(next_poll.saturating_duration_since(Instant::now()));
                    }
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            info!("Status monitor shutting down");
                            return;
                        }
                    }
                }
            }
        }

        info!("Status monitor shutting down");
    }

    /// One poll: fetch, classify, relabel, track transitions.
    ///
    /// Returns how long to wait before the next poll. Fetch and
    /// classification failures never leave the cycle; they retry on the
    /// fastest cadence.
    pub async fn run_cycle(&mut self) -> Duration {
        self.state.cycles += 1;

        let blocks = match self.source.fetch_recent(self.minimum_sample_size).await {
            Ok(blocks) => blocks,
            Err(e) => {
                warn!("Error fetching blocks: {}", e);
                Vec::new()
            }
        };

        let now = Utc::now();
        let sample = BlockSample::new(blocks);
        let classification =
            match classify(&sample, &self.thresholds, self.minimum_sample_size, now) {
                Ok(classification) => classification,
                Err(e) => {
                    let retry_in = self.scheduler.fallback_interval();
                    warn!("{}, retrying in {}s", e, retry_in.as_secs());
                    self.state.last_error = Some(e.to_string());
                    self.publish_snapshot(retry_in);
                    return retry_in;
                }
            };

        let severity = classification.severity;
        info!(
            "Status check #{}: {} (latest block age {:.1}s, {} of {} blocks empty)",
            self.state.cycles,
            severity,
            classification.block_age_seconds,
            classification.empty_blocks,
            classification.sample_size
        );

        let outcome = self.labels.publish(severity).await;
        if outcome.renamed > 0 || outcome.failed > 0 {
            debug!(
                "Status labels: {} renamed, {} unchanged, {} failed",
                outcome.renamed, outcome.unchanged, outcome.failed
            );
        }

        if self.state.debouncer.prime(severity) {
            info!("Initial status {} recorded, no notification sent", severity);
        }

        let observation = self.state.tracker.observe(severity, now);
        if let Some(transition) = observation.transition {
            info!("Status change detected: {} -> {}", transition.from, transition.to);
            match self.state.debouncer.on_transition(transition.to, Instant::now()) {
                DebounceDecision::Armed {
                    severity,
                    replaced,
                    ..
                } => {
                    let window = self.state.debouncer.window().as_secs();
                    match replaced {
                        Some(old) => info!(
                            "Pending {} notification replaced by {}, firing in {}s",
                            old, severity, window
                        ),
                        None => info!("Notification for {} scheduled in {}s", severity, window),
                    }
                }
                DebounceDecision::Cancelled { severity } => {
                    info!(
                        "Status returned to {} before the debounce window elapsed, pending {} notification dropped",
                        transition.to, severity
                    );
                }
                DebounceDecision::Unchanged => {}
            }
        }

        self.state.last_classification = Some(classification);
        self.state.last_check_at = Some(now);
        self.state.last_error = None;

        let interval = self.scheduler.next_interval(severity);
        info!(
            current = %severity,
            previous = severity_label(self.state.tracker.previous()),
            pending = severity_label(self.state.debouncer.pending().map(|p| p.severity)),
            last_published = severity_label(self.state.debouncer.last_published()),
            "Next check in {}s",
            interval.as_secs()
        );
        self.publish_snapshot(interval);
        interval
    }

    /// Send the pending alert if its deadline has passed.
    ///
    /// Returns the severity announced, if any.
    pub async fn fire_pending(&mut self) -> Option<Severity> {
        let severity = self.state.debouncer.fire(Instant::now())?;

        info!("Debounce window elapsed, sending {} notification", severity);
        let outcome = self.alerts.send(severity).await;
        self.state.alerts_sent += 1;

        if outcome.failed > 0 {
            warn!(
                "{} notification delivered to {} channels, {} failed",
                severity, outcome.delivered, outcome.failed
            );
        }
        Some(severity)
    }

    fn publish_snapshot(&self, next_check_in: Duration) {
        let pending = self.state.debouncer.pending();
        let snapshot = MonitorSnapshot {
            current: self.state.tracker.current(),
            previous: self.state.tracker.previous(),
            last_published: self.state.debouncer.last_published(),
            pending: pending.map(|p| p.severity),
            pending_fires_in_seconds: pending
                .map(|p| p.deadline.saturating_duration_since(Instant::now()).as_secs()),
            last_transition_at: self.state.tracker.last_transition_at(),
            last_check_at: self.state.last_check_at,
            last_classification: self.state.last_classification.clone(),
            last_error: self.state.last_error.clone(),
            next_check_in_seconds: next_check_in.as_secs(),
            cycles: self.state.cycles,
            alerts_sent: self.state.alerts_sent,
        };
        self.snapshot_tx.send_replace(snapshot);
    }
}

fn severity_label(severity: Option<Severity>) -> &'static str {
    severity.map_or("none", |s| s.as_str())
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}
