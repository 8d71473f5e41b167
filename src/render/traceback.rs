use super::outcome::Failure;
use crate::context::{CallContext, CapturedPanic, SCOPE_BOUNDARY, normalize};
use std::fmt::{self, Display};

pub const TRACEBACK_HEADER: &str = "Traceback (most recent call last):";

/// Frames of the runtime, the panic machinery and the toolchain shims.
const RUNTIME_PREFIXES: [&str; 6] = [
    "std::",
    "core::",
    "alloc::",
    "__rust",
    "__rustc::",
    "rust_begin_unwind",
];

/// This crate's modules whose frames sit between the caller and the callable.
const INTERNAL_MODULES: [&str; 4] = ["context", "decorator", "render", "sink"];

#[derive(Debug, Clone, PartialEq, Eq)]
struct Frame {
    function: String,
    location: Option<(String, u32)>,
}

impl Frame {
    fn call(cx: &CallContext) -> Self {
        Self {
            function: cx.qualified_name().to_owned(),
            location: Some((cx.location().file().to_owned(), cx.location().line())),
        }
    }
}

/// A rendered failure: frames, outermost first, followed by the failure
/// itself.
#[derive(Debug, Clone)]
pub struct Traceback {
    frames: Vec<Frame>,
    failure: Failure,
}

impl Traceback {
    /// A failure handed back as a value; the only frame is the decorated call.
    pub fn of_call(cx: &CallContext, failure: Failure) -> Self {
        Self {
            frames: vec![Frame::call(cx)],
            failure,
        }
    }

    /// A panic, with frames from the decorated callable down to the panic
    /// site. `scope_depth` is the depth of the catching scope, which picks the
    /// slice of `panic`'s backtrace that ran inside it.
    ///
    /// Without a recorded panic, or when the backtrace has no usable frames,
    /// this falls back to the decorated call.
    pub fn of_panic(
        cx: &CallContext,
        failure: Failure,
        panic: Option<&CapturedPanic>,
        scope_depth: usize,
    ) -> Self {
        let Some(panic) = panic else {
            return Self::of_call(cx, failure);
        };
        let skip = panic.depth().saturating_sub(scope_depth);
        let frames = select_frames(&panic.backtrace().to_string(), skip);
        Self::from_frames(cx, frames, panic.location(), failure)
    }

    fn from_frames(
        cx: &CallContext,
        mut frames: Vec<Frame>,
        panic_site: Option<(&str, u32)>,
        failure: Failure,
    ) -> Self {
        if frames.is_empty() {
            frames.push(Frame::call(cx));
        }
        if let (Some(last), Some((file, line))) = (frames.last_mut(), panic_site) {
            last.location = Some((file.to_owned(), line));
        }
        Self { frames, failure }
    }

    pub fn failure(&self) -> &Failure {
        &self.failure
    }
}

impl Display for Traceback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{TRACEBACK_HEADER}")?;
        for frame in &self.frames {
            match &frame.location {
                Some((file, line)) => {
                    writeln!(f, "  File \"{}\", line {}, in {}", file, line, frame.function)?
                }
                None => writeln!(f, "  in {}", frame.function)?,
            }
        }
        write!(f, "{}", self.failure)
    }
}

/// Frames above the `skip`-th scope boundary (counted from the most recent),
/// internal frames dropped, outermost first.
fn select_frames(rendered: &str, skip: usize) -> Vec<Frame> {
    let frames = parse_frames(rendered);
    let end = frames
        .iter()
        .enumerate()
        .filter(|(_, frame)| symbol_path(&frame.function).starts_with(SCOPE_BOUNDARY))
        .nth(skip)
        .map(|(index, _)| index)
        .or_else(|| frames.iter().position(|frame| is_decorator(&frame.function)))
        .unwrap_or(frames.len());

    let mut selected: Vec<Frame> = frames
        .into_iter()
        .take(end)
        .filter(|frame| !is_internal(&frame.function))
        .map(|frame| Frame {
            function: normalize(strip_hash(&frame.function), false),
            location: frame.location,
        })
        .collect();
    selected.reverse();
    selected
}

/// Symbol with angle brackets removed, so `<a::B as c::D>::f` and `a::B::f`
/// are matched by the same prefix.
fn symbol_path(function: &str) -> String {
    function.chars().filter(|c| !matches!(c, '<' | '>')).collect()
}

fn crate_relative(path: &str) -> Option<&str> {
    let root = module_path!().split("::").next().unwrap_or_default();
    path.strip_prefix(root)?.strip_prefix("::")
}

fn is_decorator(function: &str) -> bool {
    crate_relative(&symbol_path(function)).is_some_and(|rest| rest.starts_with("decorator::"))
}

fn is_internal(function: &str) -> bool {
    let path = symbol_path(function);
    if path == "unknown"
        || path.contains(" as core::ops::function")
        || RUNTIME_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
    {
        return true;
    }
    crate_relative(&path).is_some_and(|rest| {
        INTERNAL_MODULES.iter().any(|module| {
            rest.strip_prefix(module)
                .is_some_and(|tail| tail.starts_with("::"))
        })
    })
}

/// Drops a legacy-mangling hash suffix such as `::h0123456789abcdef`.
fn strip_hash(function: &str) -> &str {
    match function.rsplit_once("::") {
        Some((head, hash))
            if hash.len() == 17
                && hash.starts_with('h')
                && hash[1..].bytes().all(|b| b.is_ascii_hexdigit()) =>
        {
            head
        }
        _ => function,
    }
}

/// Parses the `Display` form of a `Backtrace`, most recent frame first:
///
/// ```text
///    3: my_crate::foo
///              at ./src/lib.rs:10:5
/// ```
fn parse_frames(rendered: &str) -> Vec<Frame> {
    let mut frames: Vec<Frame> = Vec::new();
    for line in rendered.lines() {
        let line = line.trim();
        if let Some(at) = line.strip_prefix("at ") {
            if let Some(frame) = frames.last_mut() {
                frame.location = parse_location(at);
            }
            continue;
        }
        if let Some((index, function)) = line.split_once(": ") {
            if !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()) {
                frames.push(Frame {
                    function: function.to_owned(),
                    location: None,
                });
            }
        }
    }
    frames
}

fn parse_location(at: &str) -> Option<(String, u32)> {
    let mut parts = at.rsplitn(3, ':');
    let _column = parts.next()?;
    let line = parts.next()?.parse().ok()?;
    let file = parts.next()?;
    Some((file.to_owned(), line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::Location;

    const RENDERED: &str = "   0: std::backtrace::Backtrace::force_capture
             at /rustc/abc/library/std/src/backtrace.rs:312:13
   1: funclog::context::panic_capture::record
   2: std::panicking::rust_panic_with_hook
   3: core::panicking::panic_fmt
   4: my_crate::inner_fail
             at ./src/lib.rs:20:5
   5: my_crate::explode::{{closure}}
             at ./src/lib.rs:15:9
   6: core::ops::function::FnOnce::call_once
   7: funclog::context::panic_capture::PanicScope::run
   8: std::panicking::try::do_call
   9: <funclog::decorator::traceback::LogTraceback<S> as funclog::decorator::decorator::Decorator>::around
  10: funclog::context::panic_capture::PanicScope::run
  11: funclog::decorator::decorated::Decorated<D,F>::call
  12: my_crate::main::h0123456789abcdef
             at ./src/main.rs:3:1";

    fn functions(frames: &[Frame]) -> Vec<&str> {
        frames.iter().map(|frame| frame.function.as_str()).collect()
    }

    #[test]
    fn parses_backtrace_rendering() {
        let frames = parse_frames(RENDERED);
        assert_eq!(frames.len(), 13);
        assert_eq!(frames[4].function, "my_crate::inner_fail");
        assert_eq!(frames[4].location, Some(("./src/lib.rs".to_owned(), 20)));
        assert_eq!(frames[1].location, None);
    }

    #[test]
    fn keeps_frames_between_the_scope_and_the_panic() {
        let innermost = select_frames(RENDERED, 0);
        assert_eq!(functions(&innermost), ["explode", "inner_fail"]);
        assert_eq!(innermost[1].location, Some(("./src/lib.rs".to_owned(), 20)));

        // an outer scope sees the same user frames through the inner decorator
        assert_eq!(functions(&select_frames(RENDERED, 1)), ["explode", "inner_fail"]);
    }

    #[test]
    fn without_a_boundary_stops_at_the_first_decorator_frame() {
        let rendered = RENDERED.replace("PanicScope::run", "elsewhere");
        assert_eq!(functions(&select_frames(&rendered, 0)), ["explode", "inner_fail"]);
    }

    #[test]
    fn classifies_internal_frames() {
        assert!(is_internal("std::panicking::begin_panic_handler::{{closure}}"));
        assert!(is_internal("<alloc::boxed::Box<F,A> as core::ops::function::Fn<Args>>::call"));
        assert!(is_internal("funclog::render::traceback::Traceback::of_panic"));
        assert!(is_internal("<funclog::decorator::stack::Stack<O,I>>::around"));
        assert!(!is_internal("funclog_demo::decorator_user"));
        assert!(!is_internal("my_crate::explode"));
        assert_eq!(strip_hash("my_crate::main::h0123456789abcdef"), "my_crate::main");
    }

    #[test]
    fn errors_render_the_decorated_call() {
        let cx = CallContext::new("tests.parse", Location::caller());
        let rendered = Traceback::of_call(&cx, Failure::new("ParseIntError", "bad")).to_string();
        let expected = format!(
            "{TRACEBACK_HEADER}\n  File \"{}\", line {}, in tests.parse\nParseIntError: bad",
            cx.location().file(),
            cx.location().line()
        );
        assert_eq!(rendered, expected);
    }

    #[test]
    fn panic_site_replaces_the_innermost_location() {
        let cx = CallContext::new("tests.explode", Location::caller());
        let frames = select_frames(RENDERED, 0);
        let traceback = Traceback::from_frames(
            &cx,
            frames,
            Some(("src/lib.rs", 21)),
            Failure::new("panic", "deep failure"),
        );
        let rendered = traceback.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines,
            [
                TRACEBACK_HEADER,
                "  File \"./src/lib.rs\", line 15, in explode",
                "  File \"src/lib.rs\", line 21, in inner_fail",
                "panic: deep failure",
            ]
        );

        let fallback = Traceback::of_panic(&cx, Failure::new("panic", "x"), None, 1).to_string();
        assert!(fallback.lines().nth(1).is_some_and(|l| l.ends_with("in tests.explode")));
    }
}
