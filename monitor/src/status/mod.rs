pub mod classifier;
pub mod debounce;
pub mod hysteresis;
pub mod interval;
pub mod monitor;
pub mod report;
pub mod types;

pub use classifier::{classify, Classification};
pub use debounce::{DebounceDecision, NotificationDebouncer, PendingAlert};
pub use hysteresis::{HysteresisTracker, Observation, Transition};
pub use interval::IntervalScheduler;
pub use monitor::{MonitorSettings, MonitorSnapshot, StatusMonitor};
pub use report::StatusReport;
pub use types::{Block, BlockSample, Severity, SeverityTable, Thresholds};
