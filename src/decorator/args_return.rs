use super::decorator::Decorator;
use crate::context::CallContext;
use crate::render::{LogArgs, Outcome};
use crate::sink::Sink;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ArgsReturnOptions {
    pub with_args: bool,
    pub with_return: bool,
    pub oneline: bool,
}

impl Default for ArgsReturnOptions {
    fn default() -> Self {
        Self {
            with_args: true,
            with_return: true,
            oneline: false,
        }
    }
}

/// Sends the rendered arguments before the call and the rendered return value
/// after a successful call.
///
/// Multi-line mode sends a `"<name> args:"` header followed by one
/// `"  <value>"` line per argument; oneline mode sends
/// `"<name> args: <a>, <b>"`. Return values use the `return:` label.
#[derive(Debug, Clone)]
pub struct LogArgsReturn<S> {
    sink: S,
    options: ArgsReturnOptions,
}

pub fn log_args_return<S: Sink>(sink: S) -> LogArgsReturn<S> {
    LogArgsReturn::with_options(sink, ArgsReturnOptions::default())
}

impl<S: Sink> LogArgsReturn<S> {
    pub fn with_options(sink: S, options: ArgsReturnOptions) -> Self {
        Self { sink, options }
    }

    pub fn with_args(mut self, enabled: bool) -> Self {
        self.options.with_args = enabled;
        self
    }

    pub fn with_return(mut self, enabled: bool) -> Self {
        self.options.with_return = enabled;
        self
    }

    pub fn oneline(mut self, enabled: bool) -> Self {
        self.options.oneline = enabled;
        self
    }

    pub fn options(&self) -> ArgsReturnOptions {
        self.options
    }

    fn emit(&self, name: &str, label: &str, values: &[String]) {
        if self.options.oneline {
            if values.is_empty() {
                self.sink.send(&format!("{name} {label}:"));
            } else {
                self.sink
                    .send(&format!("{name} {label}: {}", values.join(", ")));
            }
            return;
        }
        self.sink.send(&format!("{name} {label}:"));
        for value in values {
            self.sink.send(&format!("  {value}"));
        }
    }
}

impl<S: Sink> Decorator for LogArgsReturn<S> {
    fn around<A, R, F>(&self, cx: &CallContext, args: A, f: F) -> R
    where
        A: LogArgs,
        R: Outcome,
        F: FnOnce(A) -> R,
    {
        if self.options.with_args {
            self.emit(cx.qualified_name(), "args", &args.render());
        }
        let ret = f(args);
        if self.options.with_return && !ret.is_failure() {
            self.emit(cx.qualified_name(), "return", &ret.values());
        }
        ret
    }
}
