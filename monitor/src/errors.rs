//! Custom error types for the chain status monitor
//!
//! Provides structured error handling with context for the different failure
//! scenarios. None of these are fatal once the monitor loop is running.

use std::fmt;

/// Main error type for the monitor
#[derive(Debug)]
pub enum MonitorError {
    /// Configuration-related errors
    Config(ConfigError),

    /// Block sample could not be classified
    Status(StatusError),

    /// Label or alert delivery failed
    Publish(PublishError),

    /// Other errors with context
    Other(String),
}

/// Configuration error variants
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to load configuration file
    LoadFailed { path: String, reason: String },

    /// Invalid configuration value
    InvalidValue { field: String, reason: String },

    /// Missing required configuration
    MissingRequired { field: String },

    /// Configuration parsing error
    ParseError { reason: String },
}

/// Classification input error variants
#[derive(Debug, Clone, PartialEq)]
pub enum StatusError {
    /// Fewer blocks than the configured minimum
    InsufficientData { received: usize, required: usize },

    /// Malformed block data (timestamp, transaction count)
    InvalidInput { reason: String },
}

/// Publishing error variants
#[derive(Debug)]
pub enum PublishError {
    /// Channel rename failed
    LabelFailed { channel_id: String, reason: String },

    /// Alert message delivery failed
    AlertFailed { channel_id: String, reason: String },
}

impl fmt::Display for MonitorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorError::Config(e) => write!(f, "Configuration error: {}", e),
            MonitorError::Status(e) => write!(f, "Status error: {}", e),
            MonitorError::Publish(e) => write!(f, "Publish error: {}", e),
            MonitorError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LoadFailed { path, reason } => {
                write!(f, "Failed to load config from {}: {}", path, reason)
            }
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
            ConfigError::MissingRequired { field } => {
                write!(f, "Missing required config field: {}", field)
            }
            ConfigError::ParseError { reason } => {
                write!(f, "Failed to parse config: {}", reason)
            }
        }
    }
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusError::InsufficientData { received, required } => {
                write!(
                    f,
                    "Insufficient blocks fetched: {} of {} required",
                    received, required
                )
            }
            StatusError::InvalidInput { reason } => {
                write!(f, "Invalid block data: {}", reason)
            }
        }
    }
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishError::LabelFailed { channel_id, reason } => {
                write!(f, "Failed to rename channel {}: {}", channel_id, reason)
            }
            PublishError::AlertFailed { channel_id, reason } => {
                write!(f, "Failed to send alert to channel {}: {}", channel_id, reason)
            }
        }
    }
}

impl std::error::Error for MonitorError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for StatusError {}
impl std::error::Error for PublishError {}

impl From<anyhow::Error> for MonitorError {
    fn from(err: anyhow::Error) -> Self {
        MonitorError::Other(err.to_string())
    }
}

impl From<ConfigError> for MonitorError {
    fn from(err: ConfigError) -> Self {
        MonitorError::Config(err)
    }
}

impl From<StatusError> for MonitorError {
    fn from(err: StatusError) -> Self {
        MonitorError::Status(err)
    }
}

impl From<PublishError> for MonitorError {
    fn from(err: PublishError) -> Self {
        MonitorError::Publish(err)
    }
}
