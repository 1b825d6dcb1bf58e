use anyhow::Result;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use monitor::config::ConfigManager;
use monitor::faucet::FaucetMonitor;
use monitor::publisher::{DiscordGateway, PublisherGateway};
use monitor::scheduler::ValidationScheduler;
use monitor::services::{AlertService, ChannelValidator, LabelService};
use monitor::source::{BlockSource, RoutescanSource};
use monitor::status::{MonitorSettings, StatusMonitor};
use monitor::web::{start_web_server, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive("monitor=info".parse()?)
        .add_directive("tower_http=warn".parse()?)
        .add_directive("tokio_cron_scheduler=warn".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    fmt().with_env_filter(env_filter).init();

    info!("Starting chain status monitor");

    let config_manager = ConfigManager::new("config".to_string()).await?;
    let config = config_manager.get_current_config();

    let source: Arc<dyn BlockSource> = Arc::new(RoutescanSource::new(&config.source)?);
    let gateway: Arc<dyn PublisherGateway> = Arc::new(DiscordGateway::new(
        config.discord.api_base_url.clone(),
        config.bot_token.clone(),
    )?);

    // Channel validation at startup, then on the configured schedule
    let validator = Arc::new(ChannelValidator::from_config(gateway.clone(), &config));
    let summary = validator.validate_all().await;
    if !summary.invalid.is_empty() {
        warn!(
            "{} configured channels are unreachable and will be skipped with errors",
            summary.invalid.len()
        );
    }

    let mut validation_scheduler =
        ValidationScheduler::new(validator, config.discord.validation_schedule.clone()).await?;
    if let Err(e) = validation_scheduler.start().await {
        error!("Channel validation schedule not started: {}", e);
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let alerts = AlertService::from_config(gateway.clone(), &config);
    if !alerts.is_enabled() {
        warn!("No notification channels configured, status changes will only relabel channels");
    }

    let status_monitor = StatusMonitor::new(
        source.clone(),
        LabelService::from_config(gateway.clone(), &config),
        alerts,
        MonitorSettings::from_config(&config),
    );
    let snapshots = status_monitor.subscribe();
    let monitor_handle = tokio::spawn(status_monitor.run(shutdown_rx.clone()));

    let faucet_handle = match config.faucet.clone() {
        Some(faucet_config) => {
            let faucet = FaucetMonitor::new(faucet_config, gateway.clone())?;
            Some(tokio::spawn(faucet.run(shutdown_rx.clone())))
        }
        None => {
            info!("Faucet monitoring disabled");
            None
        }
    };

    tokio::spawn(async move {
        shutdown_signal().await;
        info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    });

    let state = AppState::new(config.clone(), source, snapshots);
    if let Err(e) = start_web_server(state, shutdown_rx).await {
        error!("Web server failed: {}", e);
    }

    if let Err(e) = monitor_handle.await {
        error!("Status monitor task failed: {}", e);
    }
    if let Some(handle) = faucet_handle {
        if let Err(e) = handle.await {
            error!("Faucet monitor task failed: {}", e);
        }
    }
    if let Err(e) = validation_scheduler.shutdown().await {
        warn!("{}", e);
    }

    info!("Chain status monitor stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
