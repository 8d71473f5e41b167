//! Caller context: qualified names from `type_name`, call sites from
//! `#[track_caller]`, and the thread-local call-site and panic scopes.

mod call_context;
mod call_site;
mod panic_capture;
mod qualname;

pub use call_context::*;
pub use call_site::*;
pub use panic_capture::*;
pub use qualname::*;
