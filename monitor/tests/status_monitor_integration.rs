//! Status engine behaviour: first observation, debounced alerting, flap
//! suppression, adaptive poll intervals and fetch failures.
//!
//! Runs on paused tokio time so debounce windows elapse instantly.

mod common;

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

use common::fixtures::*;
use monitor::config::Config;
use monitor::services::{AlertService, LabelService};
use monitor::status::{MonitorSettings, Severity, StatusMonitor};

const STATUS_CHANNEL: &str = "status-1";
const ALERT_CHANNEL: &str = "alerts-1";

async fn setup(steps: Vec<SourceStep>) -> (StatusMonitor, Arc<RecordingGateway>, Config) {
    let gateway = Arc::new(RecordingGateway::new());
    gateway.add_channel(STATUS_CHANNEL, "status", None).await;
    gateway.add_channel(ALERT_CHANNEL, "alerts", None).await;

    let config = monitor_config(&[STATUS_CHANNEL], &[ALERT_CHANNEL]);
    let monitor = StatusMonitor::new(
        Arc::new(ScriptedSource::new(steps)),
        LabelService::from_config(gateway.clone(), &config),
        AlertService::from_config(gateway.clone(), &config),
        MonitorSettings::from_config(&config),
    );
    (monitor, gateway, config)
}

fn window() -> Duration {
    Duration::from_secs(900)
}

#[tokio::test(start_paused = true)]
async fn test_first_observation_never_alerts() {
    let (mut monitor, gateway, config) = setup(vec![SourceStep::red()]).await;

    let interval = monitor.run_cycle().await;

    assert_eq!(interval, Duration::from_secs(60));
    assert_eq!(monitor.current(), Some(Severity::Red));
    assert_eq!(monitor.last_published(), Some(Severity::Red));
    assert_eq!(monitor.pending(), None);
    assert_eq!(
        gateway.channel_name(STATUS_CHANNEL).await,
        Some(config.status_names.red.clone())
    );

    tokio::time::advance(window() * 2).await;
    assert_eq!(monitor.fire_pending().await, None);
    assert!(gateway.alerts().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_transition_alerts_after_window() {
    let (mut monitor, gateway, config) =
        setup(vec![SourceStep::green(), SourceStep::red()]).await;

    monitor.run_cycle().await;
    monitor.run_cycle().await;

    // Label follows immediately, the alert waits
    assert_eq!(
        gateway.channel_name(STATUS_CHANNEL).await,
        Some(config.status_names.red.clone())
    );
    assert_eq!(monitor.pending(), Some(Severity::Red));
    assert_eq!(monitor.fire_pending().await, None);

    tokio::time::advance(window()).await;
    assert_eq!(monitor.fire_pending().await, Some(Severity::Red));
    assert_eq!(monitor.last_published(), Some(Severity::Red));
    assert_eq!(monitor.pending(), None);

    let alerts = gateway.alerts().await;
    assert_eq!(alerts.len(), 1);
    let (channel, alert) = &alerts[0];
    assert_eq!(channel, ALERT_CHANNEL);
    assert_eq!(alert.title, config.notifications.messages.red);
    assert_eq!(alert.color, 0xFF0000);
    assert_eq!(
        alert.description.as_deref(),
        Some("Block explorer: https://explorer.test")
    );
    assert_eq!(alert.footer_text, "Test Chain");
}

#[tokio::test(start_paused = true)]
async fn test_flap_inside_window_is_suppressed() {
    let (mut monitor, gateway, config) = setup(vec![
        SourceStep::green(),
        SourceStep::yellow(),
        SourceStep::green(),
    ])
    .await;

    monitor.run_cycle().await;
    tokio::time::advance(Duration::from_secs(120)).await;
    monitor.run_cycle().await;
    assert_eq!(monitor.pending(), Some(Severity::Yellow));

    tokio::time::advance(Duration::from_secs(90)).await;
    monitor.run_cycle().await;
    assert_eq!(monitor.pending(), None);

    tokio::time::advance(window() * 2).await;
    assert_eq!(monitor.fire_pending().await, None);
    assert!(gateway.alerts().await.is_empty());

    // Labels still tracked every observed change
    let renames: Vec<String> = gateway
        .renames()
        .await
        .into_iter()
        .map(|(_, name)| name)
        .collect();
    assert_eq!(
        renames,
        vec![
            config.status_names.green.clone(),
            config.status_names.yellow.clone(),
            config.status_names.green.clone(),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_newer_transition_replaces_pending_and_restarts_window() {
    let (mut monitor, gateway, _) = setup(vec![
        SourceStep::green(),
        SourceStep::yellow(),
        SourceStep::red(),
    ])
    .await;

    monitor.run_cycle().await;
    monitor.run_cycle().await;
    assert_eq!(monitor.pending(), Some(Severity::Yellow));

    tokio::time::advance(Duration::from_secs(600)).await;
    monitor.run_cycle().await;
    assert_eq!(monitor.pending(), Some(Severity::Red));

    // Past the first Yellow deadline, short of the restarted one
    tokio::time::advance(Duration::from_secs(400)).await;
    assert_eq!(monitor.fire_pending().await, None);

    tokio::time::advance(Duration::from_secs(500)).await;
    assert_eq!(monitor.fire_pending().await, Some(Severity::Red));
    assert_eq!(gateway.alerts().await.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_no_duplicate_alert_for_published_severity() {
    let (mut monitor, gateway, _) = setup(vec![
        SourceStep::green(),
        SourceStep::red(),
        SourceStep::red(),
    ])
    .await;

    monitor.run_cycle().await;
    monitor.run_cycle().await;
    tokio::time::advance(window()).await;
    assert_eq!(monitor.fire_pending().await, Some(Severity::Red));

    monitor.run_cycle().await;
    tokio::time::advance(window()).await;
    assert_eq!(monitor.fire_pending().await, None);
    assert_eq!(gateway.alerts().await.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_interval_follows_severity() {
    let (mut monitor, _, _) = setup(vec![
        SourceStep::green(),
        SourceStep::yellow(),
        SourceStep::red(),
    ])
    .await;

    assert_eq!(monitor.run_cycle().await, Duration::from_secs(120));
    assert_eq!(monitor.run_cycle().await, Duration::from_secs(90));
    assert_eq!(monitor.run_cycle().await, Duration::from_secs(60));
}

#[tokio::test(start_paused = true)]
async fn test_insufficient_or_failed_fetch_keeps_state() {
    let (mut monitor, gateway, _) = setup(vec![
        SourceStep::green(),
        SourceStep::short(),
        SourceStep::Fail,
    ])
    .await;
    let snapshots = monitor.subscribe();

    monitor.run_cycle().await;
    let renames_before = gateway.renames().await.len();

    assert_eq!(monitor.run_cycle().await, Duration::from_secs(60));
    assert!(snapshots
        .borrow()
        .last_error
        .as_deref()
        .is_some_and(|e| e.contains("3 of 11")));

    assert_eq!(monitor.run_cycle().await, Duration::from_secs(60));

    assert_eq!(monitor.current(), Some(Severity::Green));
    assert_eq!(monitor.pending(), None);
    assert_eq!(gateway.renames().await.len(), renames_before);
    assert_eq!(snapshots.borrow().cycles, 3);
}

#[tokio::test(start_paused = true)]
async fn test_run_loop_fires_alert_and_stops_on_shutdown() {
    let (monitor, gateway, _) = setup(vec![SourceStep::green(), SourceStep::red()]).await;
    let snapshots = monitor.subscribe();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let handle = tokio::spawn(monitor.run(shutdown_rx));

    // Green at t=0, Red at t=120, alert due at t=1020
    tokio::time::sleep(Duration::from_secs(1000)).await;
    assert!(gateway.alerts().await.is_empty());
    assert_eq!(snapshots.borrow().pending, Some(Severity::Red));

    tokio::time::sleep(Duration::from_secs(100)).await;
    assert_eq!(gateway.alert_titles().await.len(), 1);
    {
        let snapshot = snapshots.borrow();
        assert_eq!(snapshot.last_published, Some(Severity::Red));
        assert_eq!(snapshot.pending, None);
        assert_eq!(snapshot.alerts_sent, 1);
        assert!(snapshot.next_check_in_seconds <= 60);
    }

    shutdown_tx.send(true).unwrap();
    handle.await.unwrap();
}
