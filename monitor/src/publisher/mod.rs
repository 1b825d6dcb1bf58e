//! Publishing surface: channel labels and alert messages
//!
//! The monitor talks to the chat platform only through [`PublisherGateway`].

pub mod discord;

pub use discord::DiscordGateway;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// What the gateway knows about a channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    pub id: String,
    pub name: String,
    pub guild_id: Option<String>,
}

/// A rendered alert, delivered as a single embed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertMessage {
    pub title: String,
    pub description: Option<String>,
    pub color: u32,
    pub footer_text: String,
    pub footer_icon_url: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[async_trait]
pub trait PublisherGateway: Send + Sync {
    async fn describe_channel(&self, channel_id: &str) -> Result<ChannelInfo>;

    async fn set_label(&self, channel_id: &str, name: &str) -> Result<()>;

    async fn send_alert(&self, channel_id: &str, alert: &AlertMessage) -> Result<()>;
}
