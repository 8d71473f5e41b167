use crate::context::type_path;
use std::fmt::{self, Display};
use std::marker::PhantomData;
use std::ops::Deref;

/// An argument list that can be rendered before it is moved into the callee.
///
/// Implemented for `()` and for tuples of up to eight `Display` elements; one
/// rendered string per element.
pub trait LogArgs {
    fn render(&self) -> Vec<String>;
}

impl LogArgs for () {
    fn render(&self) -> Vec<String> {
        Vec::new()
    }
}

macro_rules! impl_log_args {
    ($($name:ident)+) => {
        impl<$($name: Display),+> LogArgs for ($($name,)+) {
            #[allow(non_snake_case)]
            fn render(&self) -> Vec<String> {
                let ($($name,)+) = self;
                vec![$($name.to_string()),+]
            }
        }
    };
}

impl_log_args!(A);
impl_log_args!(A B);
impl_log_args!(A B C);
impl_log_args!(A B C D);
impl_log_args!(A B C D E);
impl_log_args!(A B C D E F);
impl_log_args!(A B C D E F G);
impl_log_args!(A B C D E F G H);

/// A keyword argument, rendered as `name=value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kw<T> {
    name: &'static str,
    value: T,
}

pub fn kw<T>(name: &'static str, value: T) -> Kw<T> {
    Kw { name, value }
}

impl<T> Kw<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> Deref for Kw<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: Display> Display for Kw<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// The receiver of an instance method, rendered as `<path.Type object at 0x..>`.
pub struct Instance<'a, T: ?Sized>(pub &'a T);

impl<T: ?Sized> Deref for Instance<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.0
    }
}

impl<T: ?Sized> Display for Instance<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{} object at {:p}>",
            type_path::<T>(),
            self.0 as *const T
        )
    }
}

/// The receiver of an associated function standing in for a class method,
/// rendered as `<class 'path.Type'>`.
pub struct Class<T: ?Sized>(PhantomData<fn() -> *const T>);

impl<T: ?Sized> Class<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: ?Sized> Default for Class<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for Class<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for Class<T> {}

impl<T: ?Sized> Display for Class<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<class '{}'>", type_path::<T>())
    }
}

/// Any value without a `Display` form, rendered as `<path.Type>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Opaque<T>(pub T);

impl<T> Deref for Opaque<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> Display for Opaque<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", type_path::<T>())
    }
}
