use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info};

use crate::config::Config;
use crate::publisher::PublisherGateway;

#[derive(Debug, Default, Clone, Serialize, PartialEq, Eq)]
pub struct ValidationSummary {
    pub valid: Vec<String>,
    pub invalid: Vec<String>,
}

/// Checks that every configured channel is reachable with the bot token
pub struct ChannelValidator {
    gateway: Arc<dyn PublisherGateway>,
    status_channels: Vec<String>,
    notification_channels: Vec<String>,
}

impl ChannelValidator {
    pub fn from_config(gateway: Arc<dyn PublisherGateway>, config: &Config) -> Self {
        Self {
            gateway,
            status_channels: config.status_channels(),
            notification_channels: config.notification_channels(),
        }
    }

    pub async fn validate_all(&self) -> ValidationSummary {
        info!("Starting periodic channel validation...");

        let checks = self
            .status_channels
            .iter()
            .map(|id| ("Status", id))
            .chain(self.notification_channels.iter().map(|id| ("Notification", id)))
            .map(|(kind, id)| {
                let gateway = self.gateway.clone();
                async move { (kind, id, gateway.describe_channel(id).await) }
            });

        let mut summary = ValidationSummary::default();
        for (kind, channel_id, result) in join_all(checks).await {
            match result {
                Ok(channel) => {
                    info!("[√] {} channel {} ({}) validated", kind, channel.name, channel_id);
                    summary.valid.push(channel_id.clone());
                }
                Err(e) => {
                    error!("[×] Invalid {} channel {}: {}", kind.to_lowercase(), channel_id, e);
                    summary.invalid.push(channel_id.clone());
                }
            }
        }

        info!(
            "Channel validation completed: {} valid, {} invalid",
            summary.valid.len(),
            summary.invalid.len()
        );
        summary
    }
}
