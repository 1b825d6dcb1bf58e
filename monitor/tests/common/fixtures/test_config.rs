//! Test configuration builder for writing config directories to disk

use monitor::config::Config;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Builder for a config directory: main.toml, guild files and secrets.toml
pub struct TestConfigBuilder {
    temp_dir: TempDir,
    main_toml: String,
    guild_files: Vec<(String, String)>,
    secrets_toml: Option<String>,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self {
            temp_dir,
            main_toml: String::new(),
            guild_files: Vec::new(),
            secrets_toml: Some("[discord]\nbot_token = \"file-token\"\n".to_string()),
        }
    }

    pub fn with_main(mut self, toml: &str) -> Self {
        self.main_toml = toml.to_string();
        self
    }

    pub fn with_guild(mut self, file_name: &str, toml: &str) -> Self {
        self.guild_files.push((file_name.to_string(), toml.to_string()));
        self
    }

    pub fn with_secrets(mut self, toml: Option<&str>) -> Self {
        self.secrets_toml = toml.map(str::to_string);
        self
    }

    pub fn build(self) -> TestConfig {
        let config_dir = self.temp_dir.path().join("config");
        fs::create_dir_all(&config_dir).expect("Failed to create config dir");

        fs::write(config_dir.join("main.toml"), &self.main_toml).expect("Failed to write main.toml");

        for (name, toml) in &self.guild_files {
            fs::write(config_dir.join(format!("{}.toml", name)), toml)
                .expect("Failed to write guild config");
        }

        if let Some(secrets) = &self.secrets_toml {
            fs::write(config_dir.join("secrets.toml"), secrets).expect("Failed to write secrets");
        }

        TestConfig {
            _temp_dir: self.temp_dir,
            config_dir,
        }
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps the temp directory alive for the duration of a test
pub struct TestConfig {
    _temp_dir: TempDir,
    pub config_dir: PathBuf,
}

impl TestConfig {
    pub fn dir(&self) -> String {
        self.config_dir.to_string_lossy().to_string()
    }
}

/// In-memory config with the given channels, no inter-channel delay and a
/// test bot token
pub fn monitor_config(status_channels: &[&str], notification_channels: &[&str]) -> Config {
    let mut config: Config = toml::from_str(
        r#"
[notifications]
channel_update_delay_ms = 0
explorer_url = "https://explorer.test"

[branding]
name = "Test Chain"
icon_url = "https://explorer.test/icon.png"
"#,
    )
    .expect("Failed to parse test config");

    config.discord.status_channels = status_channels.iter().map(|s| s.to_string()).collect();
    config.discord.notification_channels =
        notification_channels.iter().map(|s| s.to_string()).collect();
    config.bot_token = "test-bot-token".to_string();
    config
}
