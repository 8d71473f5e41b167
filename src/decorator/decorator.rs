use super::decorated::Decorated;
use crate::context::{CallContext, qualified_name};
use crate::render::{LogArgs, Outcome};
use std::panic::Location;

/// Behaviour wrapped around one call of a callable.
///
/// `around` must call `f` exactly once and hand back what it returned; a panic
/// raised by `f` is either left to unwind or resumed with the same payload.
pub trait Decorator {
    fn around<A, R, F>(&self, cx: &CallContext, args: A, f: F) -> R
    where
        A: LogArgs,
        R: Outcome,
        F: FnOnce(A) -> R;

    /// Decorates `f`; its qualified name is resolved from its type.
    fn wrap<F>(self, f: F) -> Decorated<Self, F>
    where
        Self: Sized,
    {
        Decorated::new(self, f)
    }

    /// Decorates a single call of `f`, named after the function or method
    /// whose body contains the call.
    #[track_caller]
    fn invoke<A, R, F>(&self, args: A, f: F) -> R
    where
        A: LogArgs,
        R: Outcome,
        F: FnOnce(A) -> R,
    {
        let cx = CallContext::new(qualified_name::<F>(), Location::caller());
        self.around(&cx, args, f)
    }

    /// `outer.stack(inner)` runs `inner` closest to the callable.
    fn stack<D>(self, inner: D) -> Stack<Self, D>
    where
        Self: Sized,
        D: Decorator,
    {
        Stack { outer: self, inner }
    }
}

impl<D: Decorator> Decorator for &D {
    fn around<A, R, F>(&self, cx: &CallContext, args: A, f: F) -> R
    where
        A: LogArgs,
        R: Outcome,
        F: FnOnce(A) -> R,
    {
        (**self).around(cx, args, f)
    }
}

/// Two decorators sharing one call context.
#[derive(Debug, Clone)]
pub struct Stack<O, I> {
    outer: O,
    inner: I,
}

impl<O: Decorator, I: Decorator> Decorator for Stack<O, I> {
    fn around<A, R, F>(&self, cx: &CallContext, args: A, f: F) -> R
    where
        A: LogArgs,
        R: Outcome,
        F: FnOnce(A) -> R,
    {
        self.outer
            .around(cx, args, |args| self.inner.around(cx, args, f))
    }
}
