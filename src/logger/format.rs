use crate::context::CallSite;
use std::fmt;
use std::path::Path;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Renders events as `<file> <function>: <message>`.
///
/// Inside a [`wraps_logging_params`](crate::wraps_logging_params) call the
/// file and function come from [`CallSite::current`], so events emitted by a
/// wrapper are attributed to the wrapper's caller. Otherwise the event's own
/// file and the last segment of its module path are used.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallerFormat {
    level: bool,
    line: bool,
}

impl CallerFormat {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefixes the event level.
    pub fn with_level(mut self, enabled: bool) -> Self {
        self.level = enabled;
        self
    }

    /// Renders the file as `<file>:<line>`.
    pub fn with_line(mut self, enabled: bool) -> Self {
        self.line = enabled;
        self
    }
}

impl<S, N> FormatEvent<S, N> for CallerFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();
        if self.level {
            write!(writer, "{} ", metadata.level())?;
        }

        match CallSite::current() {
            Some(site) => {
                write!(writer, "{}", site.file_name())?;
                if self.line {
                    write!(writer, ":{}", site.line)?;
                }
                write!(writer, " {}: ", site.function)?;
            }
            None => {
                let file = metadata.file().map(base_name).unwrap_or("<unknown>");
                write!(writer, "{file}")?;
                if let (true, Some(line)) = (self.line, metadata.line()) {
                    write!(writer, ":{line}")?;
                }
                let function = metadata
                    .module_path()
                    .map(|path| path.rsplit("::").next().unwrap_or(path))
                    .unwrap_or_else(|| metadata.target());
                write!(writer, " {function}: ")?;
            }
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

fn base_name(file: &str) -> &str {
    Path::new(file)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(file)
}
