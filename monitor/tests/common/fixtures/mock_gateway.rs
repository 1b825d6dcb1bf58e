//! In-memory publisher gateway that records every rename and alert

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::Mutex;

use monitor::publisher::{AlertMessage, ChannelInfo, PublisherGateway};

#[derive(Default)]
pub struct RecordingGateway {
    channels: Mutex<HashMap<String, ChannelInfo>>,
    renames: Mutex<Vec<(String, String)>>,
    alerts: Mutex<Vec<(String, AlertMessage)>>,
    broken: Mutex<HashSet<String>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_channel(&self, id: &str, name: &str, guild_id: Option<&str>) {
        self.channels.lock().await.insert(
            id.to_string(),
            ChannelInfo {
                id: id.to_string(),
                name: name.to_string(),
                guild_id: guild_id.map(str::to_string),
            },
        );
    }

    /// Every call touching `id` fails from now on
    pub async fn break_channel(&self, id: &str) {
        self.broken.lock().await.insert(id.to_string());
    }

    pub async fn channel_name(&self, id: &str) -> Option<String> {
        self.channels.lock().await.get(id).map(|c| c.name.clone())
    }

    pub async fn renames(&self) -> Vec<(String, String)> {
        self.renames.lock().await.clone()
    }

    pub async fn alerts(&self) -> Vec<(String, AlertMessage)> {
        self.alerts.lock().await.clone()
    }

    pub async fn alert_titles(&self) -> Vec<String> {
        self.alerts
            .lock()
            .await
            .iter()
            .map(|(_, alert)| alert.title.clone())
            .collect()
    }

    async fn ensure_reachable(&self, id: &str) -> Result<()> {
        if self.broken.lock().await.contains(id) {
            return Err(anyhow!("Missing Access"));
        }
        Ok(())
    }
}

#[async_trait]
impl PublisherGateway for RecordingGateway {
    async fn describe_channel(&self, channel_id: &str) -> Result<ChannelInfo> {
        self.ensure_reachable(channel_id).await?;
        self.channels
            .lock()
            .await
            .get(channel_id)
            .cloned()
            .ok_or_else(|| anyhow!("Unknown Channel"))
    }

    async fn set_label(&self, channel_id: &str, name: &str) -> Result<()> {
        self.ensure_reachable(channel_id).await?;
        let mut channels = self.channels.lock().await;
        let channel = channels
            .get_mut(channel_id)
            .ok_or_else(|| anyhow!("Unknown Channel"))?;
        channel.name = name.to_string();
        self.renames
            .lock()
            .await
            .push((channel_id.to_string(), name.to_string()));
        Ok(())
    }

    async fn send_alert(&self, channel_id: &str, alert: &AlertMessage) -> Result<()> {
        self.ensure_reachable(channel_id).await?;
        self.alerts
            .lock()
            .await
            .push((channel_id.to_string(), alert.clone()));
        Ok(())
    }
}
