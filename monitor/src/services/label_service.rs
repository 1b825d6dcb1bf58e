use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::{Config, StatusNames};
use crate::errors::PublishError;
use crate::publisher::{ChannelInfo, PublisherGateway};
use crate::status::Severity;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LabelOutcome {
    pub renamed: usize,
    pub unchanged: usize,
    pub failed: usize,
}

/// Keeps every status channel named after the current severity
pub struct LabelService {
    gateway: Arc<dyn PublisherGateway>,
    channels: Vec<String>,
    names: StatusNames,
    update_delay: Duration,
}

impl LabelService {
    pub fn new(
        gateway: Arc<dyn PublisherGateway>,
        channels: Vec<String>,
        names: StatusNames,
        update_delay: Duration,
    ) -> Self {
        Self {
            gateway,
            channels,
            names,
            update_delay,
        }
    }

    pub fn from_config(gateway: Arc<dyn PublisherGateway>, config: &Config) -> Self {
        Self::new(
            gateway,
            config.status_channels(),
            config.label_names(),
            config.channel_update_delay(),
        )
    }

    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    /// Bring every status channel in line with `severity`.
    ///
    /// Safe to call every cycle: channels already carrying the right name are
    /// left alone. Failures are logged and counted, never propagated.
    pub async fn publish(&self, severity: Severity) -> LabelOutcome {
        let mut outcome = LabelOutcome::default();

        for (index, channel_id) in self.channels.iter().enumerate() {
            if index > 0 && !self.update_delay.is_zero() {
                tokio::time::sleep(self.update_delay).await;
            }

            match self.publish_one(channel_id, severity).await {
                Ok(true) => outcome.renamed += 1,
                Ok(false) => outcome.unchanged += 1,
                Err(e) => {
                    warn!("{}", e);
                    outcome.failed += 1;
                }
            }
        }

        outcome
    }

    async fn publish_one(&self, channel_id: &str, severity: Severity) -> Result<bool, PublishError> {
        let channel = self
            .gateway
            .describe_channel(channel_id)
            .await
            .map_err(|e| PublishError::LabelFailed {
                channel_id: channel_id.to_string(),
                reason: e.to_string(),
            })?;

        let name = self.names.resolve(severity, channel.guild_id.as_deref());
        apply_label(self.gateway.as_ref(), &channel, name).await
    }
}

/// Rename `channel` to `name` unless it already carries it.
///
/// Returns whether a rename was issued.
pub async fn apply_label(
    gateway: &dyn PublisherGateway,
    channel: &ChannelInfo,
    name: &str,
) -> Result<bool, PublishError> {
    if channel.name == name {
        debug!("Channel {} already named '{}'", channel.id, name);
        return Ok(false);
    }

    gateway
        .set_label(&channel.id, name)
        .await
        .map_err(|e| PublishError::LabelFailed {
            channel_id: channel.id.clone(),
            reason: e.to_string(),
        })?;

    info!(
        "Channel {} ({}) name updated to: {}{}",
        channel.name,
        channel.id,
        name,
        channel
            .guild_id
            .as_deref()
            .map(|g| format!(" (guild {})", g))
            .unwrap_or_default()
    );
    Ok(true)
}
