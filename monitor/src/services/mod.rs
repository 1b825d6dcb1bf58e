pub mod alert_service;
pub mod label_service;
pub mod validation_service;

pub use alert_service::{AlertOutcome, AlertService};
pub use label_service::{apply_label, LabelOutcome, LabelService};
pub use validation_service::{ChannelValidator, ValidationSummary};
