//! Logging setup. See `bin/logger_demo.rs` for a manual check.

mod logger;
pub use logger::*;

pub use tracing::{debug, error, info, trace, warn};
