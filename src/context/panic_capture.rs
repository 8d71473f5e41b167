use std::backtrace::Backtrace;
use std::cell::Cell;
use std::marker::PhantomData;
use std::panic::{self, PanicHookInfo};
use std::rc::Rc;
use std::sync::Once;
use std::thread;

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
    static LAST_PANIC: Cell<Option<Rc<CapturedPanic>>> = const { Cell::new(None) };
}

static INSTALL_HOOK: Once = Once::new();

/// Symbol of [`PanicScope::run`]; frames above it in a backtrace belong to the
/// callable run inside the scope.
pub const SCOPE_BOUNDARY: &str = concat!(module_path!(), "::PanicScope::run");

/// Stack and location of a panic raised inside a [`PanicScope`].
#[derive(Debug)]
pub struct CapturedPanic {
    backtrace: Backtrace,
    location: Option<(String, u32)>,
    depth: usize,
}

impl CapturedPanic {
    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    /// File and line of the `panic!` (or `#[track_caller]` caller).
    pub fn location(&self) -> Option<(&str, u32)> {
        self.location
            .as_ref()
            .map(|(file, line)| (file.as_str(), *line))
    }

    /// Number of scopes active on the thread when the panic was raised.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// While alive, panics on this thread are recorded for the scope to read
/// after `catch_unwind` returns.
///
/// The process panic hook is replaced on first use; the replacement records
/// the panic and then calls the previous hook.
#[must_use = "panics are only recorded while the scope is alive"]
pub struct PanicScope {
    depth: usize,
    _not_send: PhantomData<*const ()>,
}

impl PanicScope {
    pub fn enter() -> Self {
        if !thread::panicking() {
            INSTALL_HOOK.call_once(install_hook);
        }
        let depth = DEPTH.with(|active| {
            let depth = active.get() + 1;
            active.set(depth);
            depth
        });
        if depth == 1 {
            LAST_PANIC.with(|last| last.take());
        }
        Self {
            depth,
            _not_send: PhantomData,
        }
    }

    /// 1 for the outermost scope on the thread.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Runs `f`. Its frame marks where this scope's share of a panic
    /// backtrace ends, so it is never inlined.
    #[inline(never)]
    pub fn run<A, R>(&self, f: impl FnOnce(A) -> R, args: A) -> R {
        f(args)
    }

    /// Most recent panic recorded while this scope was active.
    pub fn last_panic(&self) -> Option<Rc<CapturedPanic>> {
        LAST_PANIC
            .try_with(|last| {
                let captured = last.take();
                last.set(captured.clone());
                captured
            })
            .ok()
            .flatten()
    }
}

impl Drop for PanicScope {
    fn drop(&mut self) {
        let _ = DEPTH.try_with(|active| active.set(self.depth - 1));
        if self.depth == 1 {
            let _ = LAST_PANIC.try_with(|last| last.take());
        }
    }
}

fn install_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        record(info);
        previous(info);
    }));
}

fn record(info: &PanicHookInfo<'_>) {
    let depth = DEPTH.try_with(Cell::get).unwrap_or(0);
    if depth == 0 {
        return;
    }
    let captured = CapturedPanic {
        backtrace: Backtrace::force_capture(),
        location: info
            .location()
            .map(|location| (location.file().to_owned(), location.line())),
        depth,
    };
    let _ = LAST_PANIC.try_with(|last| last.set(Some(Rc::new(captured))));
}
