use super::decorator::Decorator;
use crate::context::CallContext;
use crate::render::{LogArgs, Outcome};
use crate::sink::Sink;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StartEndOptions {
    pub with_start: bool,
    pub with_end: bool,
}

impl Default for StartEndOptions {
    fn default() -> Self {
        Self {
            with_start: true,
            with_end: true,
        }
    }
}

/// Sends `"<name> start"` before the call and `"<name> end"` after it
/// returns successfully.
#[derive(Debug, Clone)]
pub struct LogStartEnd<S> {
    sink: S,
    options: StartEndOptions,
}

pub fn log_start_end<S: Sink>(sink: S) -> LogStartEnd<S> {
    LogStartEnd::with_options(sink, StartEndOptions::default())
}

impl<S: Sink> LogStartEnd<S> {
    pub fn with_options(sink: S, options: StartEndOptions) -> Self {
        Self { sink, options }
    }

    pub fn with_start(mut self, enabled: bool) -> Self {
        self.options.with_start = enabled;
        self
    }

    pub fn with_end(mut self, enabled: bool) -> Self {
        self.options.with_end = enabled;
        self
    }

    pub fn options(&self) -> StartEndOptions {
        self.options
    }
}

impl<S: Sink> Decorator for LogStartEnd<S> {
    fn around<A, R, F>(&self, cx: &CallContext, args: A, f: F) -> R
    where
        A: LogArgs,
        R: Outcome,
        F: FnOnce(A) -> R,
    {
        if self.options.with_start {
            self.sink.send(&format!("{} start", cx.qualified_name()));
        }
        let ret = f(args);
        if self.options.with_end && !ret.is_failure() {
            self.sink.send(&format!("{} end", cx.qualified_name()));
        }
        ret
    }
}
