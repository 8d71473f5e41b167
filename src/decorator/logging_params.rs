use super::decorated::Decorated;
use super::decorator::Decorator;
use crate::context::{CallContext, CallSite, qualified_name};
use crate::render::{LogArgs, Outcome};

/// Attributes log events emitted inside a wrapper to the wrapper's caller.
///
/// For the duration of each call the original call site and the target's
/// name become [`CallSite::current`], which is what
/// [`CallerFormat`](crate::logger::CallerFormat) renders as the event's file
/// and function. The previous call site is restored when the call returns or
/// unwinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingParams {
    qualified_name: String,
}

/// Builds the decorator for a wrapper around `target`.
pub fn wraps_logging_params<T: ?Sized>(_target: &T) -> LoggingParams {
    LoggingParams::named(qualified_name::<T>())
}

impl LoggingParams {
    pub fn named(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
        }
    }

    pub fn target(&self) -> &str {
        &self.qualified_name
    }
}

impl Decorator for LoggingParams {
    fn around<A, R, F>(&self, cx: &CallContext, args: A, f: F) -> R
    where
        A: LogArgs,
        R: Outcome,
        F: FnOnce(A) -> R,
    {
        let _site = CallSite::new(cx.location(), self.qualified_name.as_str()).enter();
        f(args)
    }

    /// The wrapper takes the target's name.
    fn wrap<F>(self, f: F) -> Decorated<Self, F> {
        let name = self.qualified_name.clone();
        Decorated::new(self, f).named(name)
    }
}
