use super::Parser;
use clap::ValueEnum;

#[derive(Parser, Debug)]
pub struct Cli {
    #[arg(long)]
    pub settings: Option<String>,

    #[arg(long, value_enum, default_value_t = Demo::All)]
    pub demo: Demo,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demo {
    All,
    StartEnd,
    ArgsReturn,
    Traceback,
    LoggingParams,
}
