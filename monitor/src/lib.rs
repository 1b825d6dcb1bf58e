pub mod config;
pub mod constants;
pub mod errors;
pub mod faucet;
pub mod publisher;
pub mod scheduler;
pub mod services;
pub mod source;
pub mod status;
pub mod web;

// Re-export commonly used types
pub use config::{Config, ConfigManager};
pub use errors::{MonitorError, StatusError};
pub use publisher::{AlertMessage, ChannelInfo, DiscordGateway, PublisherGateway};
pub use services::{AlertService, ChannelValidator, LabelService};
pub use source::{BlockSource, RoutescanSource};
pub use status::{Severity, StatusMonitor};
