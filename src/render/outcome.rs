use super::args::Opaque;
use crate::context::short_type_name;
use std::any::Any;
use std::borrow::Cow;
use std::fmt::{self, Display};

/// Why a call did not return normally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    kind: String,
    message: String,
}

impl Failure {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }

    pub fn of_error<E: Display + ?Sized>(error: &E) -> Self {
        Self::new(short_type_name::<E>(), error.to_string())
    }

    pub fn of_panic(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_owned()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "Box<dyn Any>".to_owned()
        };
        Self::new("panic", message)
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// What a decorated callable returned.
///
/// `values` renders a successful return, one string per logged value: a
/// scalar gives one, a sequence or tuple gives one per element. A `Result`
/// is a failure when it is `Err`.
pub trait Outcome {
    fn values(&self) -> Vec<String>;

    fn failure(&self) -> Option<Failure> {
        None
    }

    fn is_failure(&self) -> bool {
        self.failure().is_some()
    }
}

macro_rules! impl_outcome_display {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Outcome for $ty {
                fn values(&self) -> Vec<String> {
                    vec![self.to_string()]
                }
            }
        )+
    };
}

impl_outcome_display!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, str,
    String,
);

impl Outcome for () {
    fn values(&self) -> Vec<String> {
        vec!["()".to_owned()]
    }
}

impl Outcome for Cow<'_, str> {
    fn values(&self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl<T> Outcome for Opaque<T> {
    fn values(&self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl<T: Outcome + ?Sized> Outcome for &T {
    fn values(&self) -> Vec<String> {
        (**self).values()
    }

    fn failure(&self) -> Option<Failure> {
        (**self).failure()
    }
}

impl<T: Outcome + ?Sized> Outcome for Box<T> {
    fn values(&self) -> Vec<String> {
        (**self).values()
    }

    fn failure(&self) -> Option<Failure> {
        (**self).failure()
    }
}

impl<T: Outcome> Outcome for Option<T> {
    fn values(&self) -> Vec<String> {
        match self {
            Some(value) => value.values(),
            None => vec!["None".to_owned()],
        }
    }

    fn failure(&self) -> Option<Failure> {
        self.as_ref().and_then(|value| value.failure())
    }
}

impl<T: Outcome, E: Display> Outcome for Result<T, E> {
    fn values(&self) -> Vec<String> {
        match self {
            Ok(value) => value.values(),
            Err(_) => Vec::new(),
        }
    }

    fn failure(&self) -> Option<Failure> {
        match self {
            Ok(value) => value.failure(),
            Err(error) => Some(Failure::of_error(error)),
        }
    }

    fn is_failure(&self) -> bool {
        match self {
            Ok(value) => value.is_failure(),
            Err(_) => true,
        }
    }
}

impl<T: Display> Outcome for Vec<T> {
    fn values(&self) -> Vec<String> {
        self.iter().map(ToString::to_string).collect()
    }
}

impl<T: Display> Outcome for [T] {
    fn values(&self) -> Vec<String> {
        self.iter().map(ToString::to_string).collect()
    }
}

impl<T: Display, const N: usize> Outcome for [T; N] {
    fn values(&self) -> Vec<String> {
        self.iter().map(ToString::to_string).collect()
    }
}

macro_rules! impl_outcome_tuple {
    ($($name:ident)+) => {
        impl<$($name: Display),+> Outcome for ($($name,)+) {
            #[allow(non_snake_case)]
            fn values(&self) -> Vec<String> {
                let ($($name,)+) = self;
                vec![$($name.to_string()),+]
            }
        }
    };
}

impl_outcome_tuple!(A B);
impl_outcome_tuple!(A B C);
impl_outcome_tuple!(A B C D);
impl_outcome_tuple!(A B C D E);
impl_outcome_tuple!(A B C D E F);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_and_sequences() {
        assert_eq!(3i32.values(), vec!["3"]);
        assert_eq!(vec![1i32, 2].values(), vec!["1", "2"]);
        assert_eq!((1u8, "two").values(), vec!["1", "two"]);
        assert_eq!(None::<i32>.values(), vec!["None"]);
    }

    #[test]
    fn errors_are_failures() {
        let parsed: Result<i32, _> = "x".parse::<i32>();
        let failure = parsed.failure().unwrap();
        assert_eq!(failure.kind(), "ParseIntError");
        assert_eq!(failure.to_string(), "ParseIntError: invalid digit found in string");
        assert!(parsed.values().is_empty());

        let ok: Result<i32, String> = Ok(7);
        assert!(!ok.is_failure());
        assert_eq!(ok.values(), vec!["7"]);
    }

    #[test]
    fn panic_payloads() {
        let payload: Box<dyn Any + Send> = Box::new("except!");
        assert_eq!(Failure::of_panic(payload.as_ref()).to_string(), "panic: except!");
        let payload: Box<dyn Any + Send> = Box::new(String::from("formatted 1"));
        assert_eq!(Failure::of_panic(payload.as_ref()).message(), "formatted 1");
        let payload: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(Failure::of_panic(payload.as_ref()).message(), "Box<dyn Any>");
    }
}
