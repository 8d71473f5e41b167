use super::format::CallerFormat;
use thiserror::Error;
use tracing_subscriber::{
    EnvFilter, Registry,
    filter::ParseError,
    fmt,
    layer::SubscriberExt,
    reload,
    util::{SubscriberInitExt, TryInitError},
};

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub filter: String,
}

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("invalid log filter: {0}")]
    InvalidFilter(#[from] ParseError),
    #[error("failed to reload log filter: {0}")]
    Reload(#[from] reload::Error),
    #[error("failed to install the global subscriber: {0}")]
    Init(#[from] TryInitError),
}

pub struct Logger {
    reload_handle: reload::Handle<EnvFilter, Registry>,
}

impl Logger {
    pub fn new_bootstrap() -> Result<Self, LoggerError> {
        let filter = EnvFilter::new("info");
        let (filter, reload_handle) = reload::Layer::new(filter);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().event_format(CallerFormat::new().with_level(true)))
            .try_init()?;

        Ok(Self { reload_handle })
    }

    pub fn reload_from_config(&self, config: &LogConfig) -> Result<(), LoggerError> {
        let filter = EnvFilter::try_new(&config.filter)?;
        self.reload_handle.reload(filter)?;
        Ok(())
    }
}
