use super::decorator::Decorator;
use crate::context::{CallContext, PanicScope};
use crate::render::{Failure, LogArgs, Outcome, Traceback};
use crate::sink::Sink;
use std::panic::{self, AssertUnwindSafe};

/// Sends a traceback when the call panics or returns `Err`, then hands the
/// same panic or error back to the caller.
#[derive(Debug, Clone)]
pub struct LogTraceback<S> {
    sink: S,
}

pub fn log_traceback<S: Sink>(sink: S) -> LogTraceback<S> {
    LogTraceback { sink }
}

impl<S: Sink> Decorator for LogTraceback<S> {
    fn around<A, R, F>(&self, cx: &CallContext, args: A, f: F) -> R
    where
        A: LogArgs,
        R: Outcome,
        F: FnOnce(A) -> R,
    {
        let scope = PanicScope::enter();
        let result = panic::catch_unwind(AssertUnwindSafe(|| scope.run(f, args)));
        match result {
            Ok(ret) => {
                drop(scope);
                if let Some(failure) = ret.failure() {
                    self.sink.send(&Traceback::of_call(cx, failure).to_string());
                }
                ret
            }
            Err(payload) => {
                let traceback = Traceback::of_panic(
                    cx,
                    Failure::of_panic(payload.as_ref()),
                    scope.last_panic().as_deref(),
                    scope.depth(),
                );
                drop(scope);
                self.sink.send(&traceback.to_string());
                panic::resume_unwind(payload)
            }
        }
    }
}
