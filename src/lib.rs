pub mod context;
pub mod decorator;
pub mod logger;
pub mod render;
pub mod settings;
pub mod sink;

pub use decorator::{
    Decorated, Decorator, log_args_return, log_start_end, log_traceback, wraps_logging_params,
};
pub use render::{Class, Instance, Kw, Opaque, kw};
pub use sink::Sink;
