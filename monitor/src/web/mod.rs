pub mod handlers;
pub mod server;

pub use server::{create_router, start_web_server};

use std::sync::Arc;
use tokio::sync::watch;

use crate::config::Config;
use crate::source::BlockSource;
use crate::status::MonitorSnapshot;

// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub source: Arc<dyn BlockSource>,
    pub snapshots: watch::Receiver<MonitorSnapshot>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        source: Arc<dyn BlockSource>,
        snapshots: watch::Receiver<MonitorSnapshot>,
    ) -> Self {
        Self {
            config,
            source,
            snapshots,
        }
    }
}
