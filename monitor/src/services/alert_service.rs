use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::{BrandingConfig, Config};
use crate::errors::PublishError;
use crate::publisher::{AlertMessage, PublisherGateway};
use crate::status::{Severity, SeverityTable};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AlertOutcome {
    pub delivered: usize,
    pub failed: usize,
}

/// Renders and fans out severity alerts to every notification channel.
///
/// Delivery is fire-and-forget: failures are logged per channel and never
/// retried here.
pub struct AlertService {
    gateway: Arc<dyn PublisherGateway>,
    channels: Vec<String>,
    messages: SeverityTable<String>,
    colors: SeverityTable<u32>,
    explorer_url: Option<String>,
    branding: BrandingConfig,
    update_delay: Duration,
}

impl AlertService {
    pub fn from_config(gateway: Arc<dyn PublisherGateway>, config: &Config) -> Self {
        Self {
            gateway,
            channels: config.notification_channels(),
            messages: config.notifications.messages.clone(),
            colors: config.notifications.colors.clone(),
            explorer_url: config
                .notifications
                .explorer_url
                .clone()
                .filter(|url| !url.is_empty()),
            branding: config.branding.clone(),
            update_delay: config.channel_update_delay(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.channels.is_empty()
    }

    pub fn render(&self, severity: Severity, timestamp: DateTime<Utc>) -> AlertMessage {
        AlertMessage {
            title: self.messages.get(severity).clone(),
            description: self
                .explorer_url
                .as_ref()
                .map(|url| format!("Block explorer: {}", url)),
            color: *self.colors.get(severity),
            footer_text: self.branding.name.clone(),
            footer_icon_url: self.branding.icon_url.clone(),
            timestamp,
        }
    }

    pub async fn send(&self, severity: Severity) -> AlertOutcome {
        let mut outcome = AlertOutcome::default();

        if !self.is_enabled() {
            debug!("No notification channels configured, skipping alert");
            return outcome;
        }

        let message = self.render(severity, Utc::now());
        info!("Preparing notification for status {}: {}", severity, message.title);

        for (index, channel_id) in self.channels.iter().enumerate() {
            if index > 0 && !self.update_delay.is_zero() {
                tokio::time::sleep(self.update_delay).await;
            }

            match self.gateway.send_alert(channel_id, &message).await {
                Ok(()) => {
                    info!("Notification sent to channel {}", channel_id);
                    outcome.delivered += 1;
                }
                Err(e) => {
                    let err = PublishError::AlertFailed {
                        channel_id: channel_id.clone(),
                        reason: e.to_string(),
                    };
                    warn!("{}", err);
                    outcome.failed += 1;
                }
            }
        }

        outcome
    }
}
