//! Call-site propagation through `wraps_logging_params` and `CallerFormat`.

mod common;

use common::{Buffer, Capture};
use funclog::context::CallSite;
use funclog::decorator::{Decorated, LoggingParams};
use funclog::logger::CallerFormat;
use funclog::{Decorator, Kw, kw, log_start_end, sink, wraps_logging_params};
use std::panic::{self, AssertUnwindSafe};
use tracing::Level;

/// A user-side decorator that logs from inside its wrapper.
fn debug_logged<A, R, F>(f: F) -> Decorated<LoggingParams, impl Fn(A) -> R>
where
    F: Fn(A) -> R,
{
    wraps_logging_params(&f).wrap(move |args: A| {
        tracing::debug!("test log");
        f(args)
    })
}

fn with_caller_format<T>(format: CallerFormat, body: impl FnOnce() -> T) -> (T, String) {
    let buffer = Buffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .with_writer(buffer.clone())
        .event_format(format)
        .finish();
    let ret = tracing::subscriber::with_default(subscriber, body);
    (ret, buffer.contents())
}

fn foo((a, b): (i32, Kw<i32>)) -> i32 {
    a + *b
}

fn fails((_a, _b): (i32, Kw<i32>)) -> i32 {
    panic!("inside the wrapper")
}

#[test]
fn wrapper_logs_are_attributed_to_the_caller() {
    let ((), log) = with_caller_format(CallerFormat::new(), || {
        let foo = debug_logged(foo);
        assert_eq!(foo.call((1, kw("b", 2))), 3);
    });

    assert_eq!(log, "logging_params.rs foo: test log\n");
}

#[test]
fn wrapper_takes_the_target_name() {
    fn bar((a,): (i32,)) -> i32 {
        a
    }
    let bar = debug_logged(bar);
    assert_eq!(bar.decorator().target(), bar.qualified_name());
    assert!(bar.qualified_name().ends_with("wrapper_takes_the_target_name.bar"));
}

#[test]
fn line_and_level_come_from_the_call_site() {
    let (line, log) = with_caller_format(CallerFormat::new().with_level(true).with_line(true), || {
        let foo = debug_logged(foo);
        let line = line!() + 1;
        foo.call((1, kw("b", 2)));
        line
    });

    assert_eq!(log, format!("DEBUG logging_params.rs:{line} foo: test log\n"));
}

#[test]
fn events_outside_a_wrapper_use_their_own_metadata() {
    let ((), log) = with_caller_format(CallerFormat::new(), || {
        tracing::info!("plain");
    });

    assert_eq!(log, "logging_params.rs logging_params: plain\n");
}

#[test]
fn call_site_is_restored_after_return_and_panic() {
    let inside = wraps_logging_params(&foo).wrap(|args: (i32, Kw<i32>)| {
        let site = CallSite::current().unwrap();
        assert_eq!(site.function, "foo");
        assert_eq!(site.file_name(), "logging_params.rs");
        foo(args)
    });
    assert_eq!(inside.call((2, kw("b", 2))), 4);
    assert_eq!(CallSite::current(), None);

    let failing = debug_logged(fails);
    let result = panic::catch_unwind(AssertUnwindSafe(|| failing.call((1, kw("b", 2)))));
    assert!(result.is_err());
    assert_eq!(CallSite::current(), None);
}

#[test]
fn nested_wrappers_restore_the_outer_site() {
    let inner = wraps_logging_params(&foo).wrap(foo);
    let outer = LoggingParams::named("outer").wrap(|args: (i32, Kw<i32>)| {
        let before = CallSite::current().map(|site| site.function);
        let ret = inner.call(args);
        let after = CallSite::current().map(|site| site.function);
        assert_eq!(before, after);
        ret
    });

    assert_eq!(outer.call((1, kw("b", 1))), 2);
    assert_eq!(outer.qualified_name(), "outer");
}

#[test]
fn tracing_sinks_emit_inside_the_callers_scope() {
    let ((), log) = with_caller_format(CallerFormat::new().with_level(true), || {
        let foo = wraps_logging_params(&foo)
            .stack(log_start_end(sink::info()))
            .wrap(foo);
        foo.call((1, kw("b", 2)));
    });

    assert_eq!(
        log,
        "INFO logging_params.rs foo: foo start\nINFO logging_params.rs foo: foo end\n"
    );
}

#[test]
fn capture_sink_is_unaffected_by_call_sites() {
    let out = Capture::new();
    let foo = wraps_logging_params(&foo)
        .stack(log_start_end(out.clone()))
        .wrap(foo);

    foo.call((1, kw("b", 2)));
    assert_eq!(out.lines(), ["foo start", "foo end"]);
}
