//! Sinks: where decorators send their lines.

mod sink;
pub use sink::*;
