use super::secrets::SecretsLoader;
use super::{Config, GuildConfig};
use crate::constants::discord::TOKEN_ENV_VAR;
use crate::errors::ConfigError;
use anyhow::{anyhow, Result};
use glob::glob;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::{debug, info};

const MAIN_CONFIG_FILE: &str = "main.toml";
const SECRETS_FILE: &str = "secrets.toml";

pub struct ConfigManager {
    current_config: Arc<Config>,
}

impl ConfigManager {
    pub async fn new(config_dir: String) -> Result<Self> {
        let config = Self::load_configuration(&config_dir).await?;
        Ok(Self {
            current_config: Arc::new(config),
        })
    }

    pub fn get_current_config(&self) -> Arc<Config> {
        self.current_config.clone()
    }

    async fn load_configuration(config_dir: &str) -> Result<Config> {
        let main_config_path = format!("{}/{}", config_dir, MAIN_CONFIG_FILE);
        let main_config_content = fs::read_to_string(&main_config_path).await.map_err(|e| {
            ConfigError::LoadFailed {
                path: main_config_path.clone(),
                reason: e.to_string(),
            }
        })?;

        let mut config: Config = toml::from_str(&main_config_content).map_err(|e| {
            ConfigError::ParseError {
                reason: format!("{}: {}", main_config_path, e),
            }
        })?;

        // Every other TOML file in the directory describes one guild
        let pattern = format!("{}/*.toml", config_dir);
        let mut guilds = BTreeMap::new();

        for entry in glob(&pattern).map_err(|e| anyhow!("Glob pattern error: {}", e))? {
            let path = entry.map_err(|e| anyhow!("Glob entry error: {}", e))?;
            let filename = path
                .file_name()
                .and_then(|name| name.to_str())
                .ok_or_else(|| anyhow!("Invalid filename"))?;

            if filename == MAIN_CONFIG_FILE || filename == SECRETS_FILE {
                continue;
            }

            debug!("Loading guild config: {}", path.display());

            let content = fs::read_to_string(&path)
                .await
                .map_err(|e| anyhow!("Failed to read {}: {}", path.display(), e))?;

            let guild: GuildConfig = toml::from_str(&content)
                .map_err(|e| anyhow!("Failed to parse {}: {}", path.display(), e))?;

            if guild.status_channel_id.is_none() && guild.notification_channel_ids.is_empty() {
                debug!("Guild {} has no channels configured, skipping", guild.guild_id);
                continue;
            }

            info!(
                "Loaded configuration for guild {} with {} notification channels",
                guild.guild_id,
                guild.notification_channel_ids.len()
            );
            guilds.insert(guild.guild_id.clone(), guild);
        }

        config.guilds = guilds;

        let secrets = SecretsLoader::load(&Path::new(config_dir).join(SECRETS_FILE))?;
        config.bot_token = std::env::var(TOKEN_ENV_VAR)
            .ok()
            .filter(|token| !token.trim().is_empty())
            .or_else(|| secrets.bot_token().map(str::to_string))
            .unwrap_or_default();

        config.validate()?;

        info!(
            "Loaded {} guilds, {} status channels, {} notification channels, faucet {}",
            config.guilds.len(),
            config.status_channels().len(),
            config.notification_channels().len(),
            if config.faucet.is_some() { "enabled" } else { "disabled" }
        );

        Ok(config)
    }
}
