//! Optional faucet balance monitor.
//!
//! Polls the faucet address balance and names a channel after whether it is
//! above the threshold. Independent of the chain status engine.

use anyhow::{anyhow, Context, Result};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::config::FaucetConfig;
use crate::constants::source::REQUEST_TIMEOUT_SECONDS;
use crate::publisher::PublisherGateway;
use crate::services::apply_label;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FaucetStatus {
    Full,
    Dry,
}

impl fmt::Display for FaucetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaucetStatus::Full => write!(f, "full"),
            FaucetStatus::Dry => write!(f, "dry"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct BalanceResponse {
    #[serde(default)]
    items: Vec<BalanceItem>,
}

#[derive(Debug, Deserialize)]
struct BalanceItem {
    balance: Option<Value>,
}

/// Balances can exceed u64, and the API returns them as strings or numbers
fn parse_balance(value: &Value) -> Option<u128> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_u64().map(u128::from),
        _ => None,
    }
}

pub struct FaucetMonitor {
    client: HttpClient,
    gateway: Arc<dyn PublisherGateway>,
    config: FaucetConfig,
    current: Option<FaucetStatus>,
}

impl FaucetMonitor {
    pub fn new(config: FaucetConfig, gateway: Arc<dyn PublisherGateway>) -> Result<Self> {
        let client = HttpClient::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
            .build()
            .context("Failed to build faucet HTTP client")?;

        Ok(Self {
            client,
            gateway,
            config,
            current: None,
        })
    }

    pub fn current(&self) -> Option<FaucetStatus> {
        self.current
    }

    pub fn status_for(&self, balance: u128) -> FaucetStatus {
        if balance > u128::from(self.config.threshold) {
            FaucetStatus::Full
        } else {
            FaucetStatus::Dry
        }
    }

    pub async fn fetch_balance(&self) -> Result<u128> {
        let url = self.config.balance_url();
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?;

        if !response.status().is_success() {
            return Err(anyhow!("Balance request returned HTTP {}", response.status()));
        }

        let body: BalanceResponse = response
            .json()
            .await
            .context("Failed to parse balance response")?;

        body.items
            .first()
            .and_then(|item| item.balance.as_ref())
            .and_then(parse_balance)
            .ok_or_else(|| anyhow!("Invalid API response: missing balance value"))
    }

    /// One check. A failed fetch keeps the current status; the channel is only
    /// touched when the status changes.
    pub async fn check(&mut self) -> Option<FaucetStatus> {
        let balance = match self.fetch_balance().await {
            Ok(balance) => balance,
            Err(e) => {
                warn!("Faucet balance unavailable, keeping current status: {}", e);
                return self.current;
            }
        };

        let status = self.status_for(balance);
        if self.current == Some(status) {
            debug!("Faucet still {} (balance {})", status, balance);
            return self.current;
        }

        info!(
            "Faucet status changed from {} to {} (balance {}, threshold {})",
            self.current
                .map(|s| s.to_string())
                .unwrap_or_else(|| "initial".to_string()),
            status,
            balance,
            self.config.threshold
        );

        let name = match status {
            FaucetStatus::Full => &self.config.full_name,
            FaucetStatus::Dry => &self.config.dry_name,
        };

        match self.gateway.describe_channel(&self.config.channel_id).await {
            Ok(channel) => {
                if let Err(e) = apply_label(self.gateway.as_ref(), &channel, name).await {
                    error!("{}", e);
                }
            }
            Err(e) => error!(
                "Cannot access faucet channel {}: {}",
                self.config.channel_id, e
            ),
        }

        self.current = Some(status);
        self.current
    }

    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!(
            "Starting faucet monitoring: channel {}, threshold {}, every {}s",
            self.config.channel_id, self.config.threshold, self.config.fetch_interval_seconds
        );

        let mut interval =
            tokio::time::interval(Duration::from_secs(self.config.fetch_interval_seconds));
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.check().await;
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Faucet monitor shutting down");
                        return;
                    }
                }
            }
        }
    }
}
