//! This module provides reusable test utilities:
//! - Scripted block source and recording publisher gateway
//! - Mock HTTP servers (block explorer, Discord API)
//! - Test configuration builders
//! - Common test data

// Allow unused code in test fixtures - not every test binary uses every helper
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod mock_discord;
pub mod mock_explorer;
pub mod mock_gateway;
pub mod mock_source;
pub mod test_config;
pub mod test_data;

// Re-export commonly used items
pub use mock_discord::MockDiscordServer;
pub use mock_explorer::MockExplorerServer;
pub use mock_gateway::RecordingGateway;
pub use mock_source::{ScriptedSource, SourceStep};
pub use test_config::{monitor_config, TestConfigBuilder};
pub use test_data::*;
