//! The `logger` module installs the global subscriber and provides the
//! call-site aware event format. See `bin/logger_demo.rs` for a test binary
//! demonstrating its usage.

mod format;
mod logger;
pub use format::*;
pub use logger::*;

pub use tracing::{debug, error, info, trace, warn};
