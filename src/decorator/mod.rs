//! Decorators: `log_start_end`, `log_args_return`, `log_traceback` and
//! `wraps_logging_params`, plus the `Decorator` trait they share.

mod args_return;
mod decorated;
mod decorator;
mod logging_params;
mod start_end;
mod traceback;

pub use args_return::*;
pub use decorated::*;
pub use decorator::*;
pub use logging_params::*;
pub use start_end::*;
pub use traceback::*;
