pub mod manager;
pub mod secrets;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

pub use manager::ConfigManager;

use crate::constants::{discord, faucet, intervals, notifications, source, thresholds, web};
use crate::errors::ConfigError;
use crate::status::{Severity, SeverityTable, Thresholds};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub thresholds: Thresholds,
    /// Poll interval per severity, in seconds
    #[serde(default = "default_intervals")]
    pub intervals: SeverityTable<u64>,
    /// Channel name per severity
    #[serde(default = "default_status_names")]
    pub status_names: SeverityTable<String>,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub discord: DiscordConfig,
    #[serde(default)]
    pub branding: BrandingConfig,
    pub faucet: Option<FaucetConfig>,
    // Populated from individual guild config files
    #[serde(skip)]
    pub guilds: BTreeMap<String, GuildConfig>,
    // Populated from secrets.toml or the environment
    #[serde(skip)]
    pub bot_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_blocks_endpoint")]
    pub blocks_endpoint: String,
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,
    #[serde(default = "default_report_sample_size")]
    pub report_sample_size: usize,
    #[serde(default = "default_source_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            blocks_endpoint: default_blocks_endpoint(),
            sample_size: default_sample_size(),
            report_sample_size: default_report_sample_size(),
            request_timeout_seconds: default_source_timeout(),
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            critical_block_age_seconds: thresholds::CRITICAL_BLOCK_AGE_SECONDS,
            warning_block_age_seconds: thresholds::WARNING_BLOCK_AGE_SECONDS,
            max_empty_blocks: thresholds::MAX_EMPTY_BLOCKS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_debounce_seconds")]
    pub debounce_seconds: u64,
    #[serde(default = "default_channel_update_delay")]
    pub channel_update_delay_ms: u64,
    #[serde(default = "default_messages")]
    pub messages: SeverityTable<String>,
    #[serde(default = "default_colors")]
    pub colors: SeverityTable<u32>,
    /// Appended to every alert as "Block explorer: <url>"
    pub explorer_url: Option<String>,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            debounce_seconds: default_debounce_seconds(),
            channel_update_delay_ms: default_channel_update_delay(),
            messages: default_messages(),
            colors: default_colors(),
            explorer_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default)]
    pub status_channels: Vec<String>,
    #[serde(default)]
    pub notification_channels: Vec<String>,
    #[serde(default = "default_validation_schedule")]
    pub validation_schedule: String,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            status_channels: Vec::new(),
            notification_channels: Vec::new(),
            validation_schedule: default_validation_schedule(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandingConfig {
    #[serde(default = "default_branding_name")]
    pub name: String,
    pub icon_url: Option<String>,
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            name: default_branding_name(),
            icon_url: None,
        }
    }
}

/// Per-guild overrides, one file per guild in the config directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuildConfig {
    pub guild_id: String,
    pub status_channel_id: Option<String>,
    #[serde(default)]
    pub notification_channel_ids: Vec<String>,
    #[serde(default)]
    pub status_names: GuildStatusNames,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuildStatusNames {
    pub green: Option<String>,
    pub yellow: Option<String>,
    pub red: Option<String>,
}

impl GuildStatusNames {
    fn get(&self, severity: Severity) -> Option<&str> {
        let name = match severity {
            Severity::Green => &self.green,
            Severity::Yellow => &self.yellow,
            Severity::Red => &self.red,
        };
        name.as_deref().filter(|n| !n.is_empty())
    }
}

/// Resolves the channel name for a severity, preferring guild overrides
#[derive(Debug, Clone)]
pub struct StatusNames {
    global: SeverityTable<String>,
    guilds: BTreeMap<String, GuildStatusNames>,
}

impl StatusNames {
    pub fn new(global: SeverityTable<String>, guilds: BTreeMap<String, GuildStatusNames>) -> Self {
        Self { global, guilds }
    }

    pub fn resolve(&self, severity: Severity, guild_id: Option<&str>) -> &str {
        guild_id
            .and_then(|id| self.guilds.get(id))
            .and_then(|names| names.get(severity))
            .unwrap_or_else(|| self.global.get(severity).as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaucetConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_balance_endpoint")]
    pub balance_endpoint: String,
    pub address: String,
    pub channel_id: String,
    #[serde(default = "default_faucet_threshold")]
    pub threshold: u64,
    #[serde(default = "default_faucet_interval")]
    pub fetch_interval_seconds: u64,
    #[serde(default = "default_faucet_full_name")]
    pub full_name: String,
    #[serde(default = "default_faucet_dry_name")]
    pub dry_name: String,
}

impl FaucetConfig {
    pub fn balance_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.balance_endpoint.replace("{address}", &self.address)
        )
    }
}

impl Config {
    pub fn poll_intervals(&self) -> SeverityTable<Duration> {
        self.intervals.map(|secs| Duration::from_secs(*secs))
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_secs(self.notifications.debounce_seconds)
    }

    pub fn channel_update_delay(&self) -> Duration {
        Duration::from_millis(self.notifications.channel_update_delay_ms)
    }

    pub fn label_names(&self) -> StatusNames {
        let guilds = self
            .guilds
            .values()
            .map(|g| (g.guild_id.clone(), g.status_names.clone()))
            .collect();
        StatusNames::new(self.status_names.clone(), guilds)
    }

    /// Global status channels followed by guild ones, without duplicates
    pub fn status_channels(&self) -> Vec<String> {
        let guild_channels = self
            .guilds
            .values()
            .filter_map(|g| g.status_channel_id.clone());
        dedup_channels(self.discord.status_channels.iter().cloned().chain(guild_channels))
    }

    /// Global notification channels followed by guild ones, without duplicates
    pub fn notification_channels(&self) -> Vec<String> {
        let guild_channels = self
            .guilds
            .values()
            .flat_map(|g| g.notification_channel_ids.iter().cloned());
        dedup_channels(
            self.discord
                .notification_channels
                .iter()
                .cloned()
                .chain(guild_channels),
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for severity in Severity::ALL {
            if *self.intervals.get(severity) == 0 {
                return Err(ConfigError::InvalidValue {
                    field: format!("intervals.{}", severity),
                    reason: "must be greater than zero".to_string(),
                });
            }
        }

        if self.source.sample_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "source.sample_size".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.source.report_sample_size < self.source.sample_size {
            return Err(ConfigError::InvalidValue {
                field: "source.report_sample_size".to_string(),
                reason: format!("must be at least sample_size ({})", self.source.sample_size),
            });
        }

        if self.thresholds.warning_block_age_seconds > self.thresholds.critical_block_age_seconds {
            return Err(ConfigError::InvalidValue {
                field: "thresholds.warning_block_age_seconds".to_string(),
                reason: "must not exceed critical_block_age_seconds".to_string(),
            });
        }

        if self.bot_token.trim().is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "bot_token".to_string(),
            });
        }

        if let Some(faucet) = &self.faucet {
            if faucet.fetch_interval_seconds == 0 {
                return Err(ConfigError::InvalidValue {
                    field: "faucet.fetch_interval_seconds".to_string(),
                    reason: "must be greater than zero".to_string(),
                });
            }
        }

        Ok(())
    }
}

fn dedup_channels(channels: impl Iterator<Item = String>) -> Vec<String> {
    let mut result: Vec<String> = Vec::new();
    for channel in channels {
        let channel = channel.trim().to_string();
        if !channel.is_empty() && !result.contains(&channel) {
            result.push(channel);
        }
    }
    result
}

fn default_host() -> String {
    web::DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    web::DEFAULT_PORT
}

fn default_base_url() -> String {
    source::DEFAULT_BASE_URL.to_string()
}

fn default_blocks_endpoint() -> String {
    source::DEFAULT_BLOCKS_ENDPOINT.to_string()
}

fn default_sample_size() -> usize {
    source::MINIMUM_SAMPLE_SIZE
}

fn default_report_sample_size() -> usize {
    source::REPORT_SAMPLE_SIZE
}

fn default_source_timeout() -> u64 {
    source::REQUEST_TIMEOUT_SECONDS
}

fn default_intervals() -> SeverityTable<u64> {
    SeverityTable::new(
        intervals::GREEN_SECONDS,
        intervals::YELLOW_SECONDS,
        intervals::RED_SECONDS,
    )
}

fn default_status_names() -> SeverityTable<String> {
    SeverityTable::new(
        "⊢⛓ Testnet status: ✅".to_string(),
        "⊢⛓ Testnet status: 🟨".to_string(),
        "⊢⛓ Testnet status: ❌".to_string(),
    )
}

fn default_debounce_seconds() -> u64 {
    notifications::DEBOUNCE_SECONDS
}

fn default_channel_update_delay() -> u64 {
    notifications::CHANNEL_UPDATE_DELAY_MS
}

fn default_messages() -> SeverityTable<String> {
    SeverityTable::new(
        "Testnet status: **operational**  ✅".to_string(),
        "Testnet status: **unstable**  ⚠️".to_string(),
        "Testnet status: **outage**  ❌️".to_string(),
    )
}

fn default_colors() -> SeverityTable<u32> {
    SeverityTable::new(
        notifications::GREEN_COLOR,
        notifications::YELLOW_COLOR,
        notifications::RED_COLOR,
    )
}

fn default_api_base_url() -> String {
    discord::DEFAULT_API_BASE_URL.to_string()
}

fn default_validation_schedule() -> String {
    discord::VALIDATION_SCHEDULE.to_string()
}

fn default_branding_name() -> String {
    "Chain Status".to_string()
}

fn default_balance_endpoint() -> String {
    "/address/{address}/gas-balance".to_string()
}

fn default_faucet_threshold() -> u64 {
    faucet::DEFAULT_THRESHOLD
}

fn default_faucet_interval() -> u64 {
    faucet::FETCH_INTERVAL_SECONDS
}

fn default_faucet_full_name() -> String {
    "・faucet status꞉💧・".to_string()
}

fn default_faucet_dry_name() -> String {
    "・faucet status꞉❌・".to_string()
}
