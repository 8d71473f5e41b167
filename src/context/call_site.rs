use super::qualname::short_name;
use std::cell::RefCell;
use std::marker::PhantomData;
use std::panic::Location;
use std::path::Path;

thread_local! {
    static CALL_SITES: RefCell<Vec<CallSite>> = const { RefCell::new(Vec::new()) };
}

/// Where a decorated callable was invoked from, and what it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
    pub function: String,
    pub qualified_name: String,
}

impl CallSite {
    pub fn new(location: &'static Location<'static>, qualified_name: impl Into<String>) -> Self {
        let qualified_name = qualified_name.into();
        Self {
            file: location.file(),
            line: location.line(),
            column: location.column(),
            function: short_name(&qualified_name).to_owned(),
            qualified_name,
        }
    }

    /// Base name of the source file.
    pub fn file_name(&self) -> &str {
        Path::new(self.file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(self.file)
    }

    /// Innermost call site entered on this thread.
    pub fn current() -> Option<CallSite> {
        CALL_SITES
            .try_with(|sites| sites.borrow().last().cloned())
            .ok()
            .flatten()
    }

    /// Makes this the current call site until the guard is dropped.
    pub fn enter(self) -> CallSiteGuard {
        let depth = CALL_SITES.with(|sites| {
            let mut sites = sites.borrow_mut();
            let depth = sites.len();
            sites.push(self);
            depth
        });
        CallSiteGuard {
            depth,
            _not_send: PhantomData,
        }
    }
}

/// Restores the call-site stack to its state before [`CallSite::enter`].
#[must_use = "the call site is left as soon as the guard is dropped"]
pub struct CallSiteGuard {
    depth: usize,
    _not_send: PhantomData<*const ()>,
}

impl Drop for CallSiteGuard {
    fn drop(&mut self) {
        let _ = CALL_SITES.try_with(|sites| sites.borrow_mut().truncate(self.depth));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};

    #[track_caller]
    fn here(name: &str) -> CallSite {
        CallSite::new(Location::caller(), name)
    }

    #[test]
    fn nested_scopes_restore_outer_site() {
        assert_eq!(CallSite::current(), None);
        let outer = here("tests.outer");
        let _outer = outer.clone().enter();
        {
            let _inner = here("tests.inner").enter();
            assert_eq!(CallSite::current().map(|s| s.function), Some("inner".to_owned()));
        }
        assert_eq!(CallSite::current(), Some(outer));
    }

    #[test]
    fn unwinding_leaves_the_scope() {
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let _guard = here("tests.boom").enter();
            panic!("boom");
        }));
        assert!(result.is_err());
        assert_eq!(CallSite::current(), None);
    }

    #[test]
    fn records_caller_location() {
        let site = here("tests.records_caller_location");
        assert_eq!(site.file_name(), "call_site.rs");
        assert_eq!(site.function, "records_caller_location");
        assert!(site.line > 0);
    }

    #[test]
    fn other_threads_are_unaffected() {
        let _guard = here("tests.main_thread").enter();
        let seen = std::thread::spawn(CallSite::current).join().unwrap();
        assert_eq!(seen, None);
    }
}
