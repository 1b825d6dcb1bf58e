//! Central repository for default configuration values and limits
//!
//! Constants are grouped by concern so config defaults, HTTP adapters and
//! tests all agree on a single source of truth.

/// Block explorer defaults
pub mod source {
    /// Default explorer API base (testnet network 3636)
    pub const DEFAULT_BASE_URL: &str = "https://api.routescan.io/v2/network/testnet/evm/3636";

    /// Endpoint returning the most recent blocks, newest first
    pub const DEFAULT_BLOCKS_ENDPOINT: &str = "/blocks?count=false&sort=desc";

    /// Minimum number of blocks required to classify a cycle
    pub const MINIMUM_SAMPLE_SIZE: usize = 11;

    /// Number of blocks analysed for an on-demand status report
    pub const REPORT_SAMPLE_SIZE: usize = 100;

    /// Timeout for a single explorer request
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 10;
}

/// Classification thresholds
pub mod thresholds {
    /// Latest block older than this is an outage
    pub const CRITICAL_BLOCK_AGE_SECONDS: u64 = 600;

    /// Latest block older than this is degraded
    pub const WARNING_BLOCK_AGE_SECONDS: u64 = 60;

    /// More empty blocks than this in the sample is degraded
    pub const MAX_EMPTY_BLOCKS: usize = 8;
}

/// Poll cadence per severity (seconds)
pub mod intervals {
    pub const RED_SECONDS: u64 = 60;
    pub const YELLOW_SECONDS: u64 = 90;
    pub const GREEN_SECONDS: u64 = 120;
}

/// Alert and label publishing
pub mod notifications {
    /// Debounce window before a transition becomes an alert (15 minutes)
    pub const DEBOUNCE_SECONDS: u64 = 900;

    /// Pause between consecutive calls to the chat API
    pub const CHANNEL_UPDATE_DELAY_MS: u64 = 1000;

    /// Timeout for a single chat API request
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 10;

    pub const RED_COLOR: u32 = 0xFF0000;
    pub const YELLOW_COLOR: u32 = 0xFFFF00;
    pub const GREEN_COLOR: u32 = 0x00FF00;
}

/// Chat platform defaults
pub mod discord {
    /// REST API base
    pub const DEFAULT_API_BASE_URL: &str = "https://discord.com/api/v10";

    /// Environment variable overriding the bot token from secrets.toml
    pub const TOKEN_ENV_VAR: &str = "DISCORD_TOKEN";

    /// Channel validation schedule (6-field cron: sec min hour day month dow)
    pub const VALIDATION_SCHEDULE: &str = "0 0 0 * * *";
}

/// Faucet monitoring defaults
pub mod faucet {
    /// Faucet balance poll interval
    pub const FETCH_INTERVAL_SECONDS: u64 = 300;

    /// Balance (wei) at or below which the faucet is considered dry
    pub const DEFAULT_THRESHOLD: u64 = 100_000_000_000_000;
}

/// Web server defaults
pub mod web {
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 8095;
}
