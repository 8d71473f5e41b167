use tracing::Level;

/// The output channel of every decorator: one call per emitted line or block.
///
/// Any `Fn(&str)` is a sink. A failing sink is expected to panic, and the
/// panic reaches the caller of the decorated function untouched.
pub trait Sink {
    fn send(&self, line: &str);
}

impl<F> Sink for F
where
    F: Fn(&str) + ?Sized,
{
    fn send(&self, line: &str) {
        self(line)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Stdout;

impl Sink for Stdout {
    fn send(&self, line: &str) {
        println!("{line}");
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Stderr;

impl Sink for Stderr {
    fn send(&self, line: &str) {
        eprintln!("{line}");
    }
}

pub fn stdout() -> Stdout {
    Stdout
}

pub fn stderr() -> Stderr {
    Stderr
}

/// Emits each line as a `tracing` event at a fixed level.
#[derive(Debug, Clone, Copy)]
pub struct TracingSink {
    level: Level,
}

impl TracingSink {
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    pub fn level(&self) -> Level {
        self.level
    }
}

impl Sink for TracingSink {
    fn send(&self, line: &str) {
        let level = self.level;
        if level == Level::TRACE {
            tracing::trace!(target: "funclog", "{}", line);
        } else if level == Level::DEBUG {
            tracing::debug!(target: "funclog", "{}", line);
        } else if level == Level::INFO {
            tracing::info!(target: "funclog", "{}", line);
        } else if level == Level::WARN {
            tracing::warn!(target: "funclog", "{}", line);
        } else {
            tracing::error!(target: "funclog", "{}", line);
        }
    }
}

pub fn trace() -> TracingSink {
    TracingSink::new(Level::TRACE)
}

pub fn debug() -> TracingSink {
    TracingSink::new(Level::DEBUG)
}

pub fn info() -> TracingSink {
    TracingSink::new(Level::INFO)
}

pub fn warn() -> TracingSink {
    TracingSink::new(Level::WARN)
}

pub fn error() -> TracingSink {
    TracingSink::new(Level::ERROR)
}
