use super::decorator::Decorator;
use crate::context::{CallContext, qualified_name};
use crate::render::{LogArgs, Outcome};
use std::panic::Location;

/// A callable together with the decorator applied around each of its calls.
#[derive(Debug, Clone)]
pub struct Decorated<D, F> {
    decorator: D,
    f: F,
    name: Option<String>,
}

impl<D: Decorator, F> Decorated<D, F> {
    pub fn new(decorator: D, f: F) -> Self {
        Self {
            decorator,
            f,
            name: None,
        }
    }

    /// Replaces the qualified name resolved from `F`.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn qualified_name(&self) -> String {
        self.name.clone().unwrap_or_else(qualified_name::<F>)
    }

    pub fn decorator(&self) -> &D {
        &self.decorator
    }

    pub fn into_inner(self) -> F {
        self.f
    }

    #[track_caller]
    pub fn call<A, R>(&self, args: A) -> R
    where
        F: Fn(A) -> R,
        A: LogArgs,
        R: Outcome,
    {
        let cx = CallContext::new(self.qualified_name(), Location::caller());
        self.decorator.around(&cx, args, &self.f)
    }
}
