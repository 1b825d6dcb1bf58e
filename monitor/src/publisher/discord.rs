//! Minimal Discord REST adapter: describe, rename, post embed.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use super::{AlertMessage, ChannelInfo, PublisherGateway};
use crate::constants::notifications;

#[derive(Debug, Deserialize)]
struct ChannelResponse {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    guild_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct Embed<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    color: u32,
    footer: EmbedFooter<'a>,
    timestamp: String,
}

#[derive(Debug, Serialize)]
struct EmbedFooter<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon_url: Option<&'a str>,
}

pub struct DiscordGateway {
    client: Client,
    api_base_url: String,
    token: String,
}

impl DiscordGateway {
    pub fn new(api_base_url: String, token: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(notifications::REQUEST_TIMEOUT_SECONDS))
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client for Discord: {}", e))?;

        Ok(Self {
            client,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn channel_url(&self, channel_id: &str) -> String {
        format!("{}/channels/{}", self.api_base_url, channel_id.trim())
    }

    fn auth_header(&self) -> String {
        format!("Bot {}", self.token)
    }

    async fn check(response: Response, action: &str, channel_id: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(anyhow!(
            "{} for channel {} returned HTTP {}: {}",
            action,
            channel_id,
            status,
            body
        ))
    }
}

#[async_trait]
impl PublisherGateway for DiscordGateway {
    async fn describe_channel(&self, channel_id: &str) -> Result<ChannelInfo> {
        let response = self
            .client
            .get(self.channel_url(channel_id))
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(|e| anyhow!("Failed to fetch channel {}: {}", channel_id, e))?;

        let channel: ChannelResponse = Self::check(response, "Channel lookup", channel_id)
            .await?
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse channel {}: {}", channel_id, e))?;

        Ok(ChannelInfo {
            id: channel.id,
            name: channel.name.unwrap_or_default(),
            guild_id: channel.guild_id,
        })
    }

    async fn set_label(&self, channel_id: &str, name: &str) -> Result<()> {
        debug!("Renaming channel {} to '{}'", channel_id, name);
        let response = self
            .client
            .patch(self.channel_url(channel_id))
            .header("Authorization", self.auth_header())
            .json(&json!({ "name": name }))
            .send()
            .await
            .map_err(|e| anyhow!("Failed to rename channel {}: {}", channel_id, e))?;

        Self::check(response, "Channel rename", channel_id).await?;
        Ok(())
    }

    async fn send_alert(&self, channel_id: &str, alert: &AlertMessage) -> Result<()> {
        let embed = Embed {
            title: &alert.title,
            description: alert.description.as_deref(),
            color: alert.color,
            footer: EmbedFooter {
                text: &alert.footer_text,
                icon_url: alert.footer_icon_url.as_deref(),
            },
            timestamp: alert.timestamp.to_rfc3339(),
        };

        let response = self
            .client
            .post(format!("{}/messages", self.channel_url(channel_id)))
            .header("Authorization", self.auth_header())
            .json(&json!({ "embeds": [embed] }))
            .send()
            .await
            .map_err(|e| anyhow!("Failed to post message to {}: {}", channel_id, e))?;

        Self::check(response, "Message post", channel_id).await?;
        Ok(())
    }
}
