//! HTTP request handlers for the monitor API.
//!
//! - `common` - Response envelope shared by every endpoint
//! - `health` - Liveness of the process itself
//! - `status` - Engine state and on-demand chain status reports

pub mod common;
pub mod health;
pub mod status;

pub use health::*;
pub use status::*;
