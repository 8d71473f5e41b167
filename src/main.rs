use funclog::decorator::{Decorated, LogArgsReturn, LogStartEnd, LoggingParams};
use funclog::logger::*;
use funclog::settings::*;
use funclog::{Class, Decorator, Instance, Kw, kw, log_traceback, sink, wraps_logging_params};
use std::num::ParseIntError;

struct Calculator {
    offset: i32,
}

impl Calculator {
    fn add(&self, options: &Settings, a: i32, b: i32) -> i32 {
        LogArgsReturn::with_options(sink::info(), options.args_return)
            .invoke((Instance(self), a, kw("b", b)), |(this, a, b)| this.offset + a + *b)
    }

    fn scaled(options: &Settings, a: i32, b: i32) -> i32 {
        LogArgsReturn::with_options(sink::info(), options.args_return)
            .invoke((Class::<Calculator>::new(), a, kw("b", b)), |(_cls, a, b)| a * *b)
    }

    fn halves(options: &Settings, value: i32) -> (i32, i32) {
        LogArgsReturn::with_options(sink::info(), options.args_return)
            .invoke((value,), |(value,)| (value / 2, value - value / 2))
    }
}

fn add((a, b): (i32, Kw<i32>)) -> i32 {
    println!("{}+{}", a, *b);
    a + *b
}

fn parse_port((raw,): (&str,)) -> Result<u16, ParseIntError> {
    raw.parse()
}

fn greet((name,): (&str,)) -> String {
    format!("hello, {name}")
}

/// A user-side decorator whose events are attributed to the decorated
/// function's caller.
fn traced<A, R, F>(f: F) -> Decorated<LoggingParams, impl Fn(A) -> R>
where
    F: Fn(A) -> R,
{
    wraps_logging_params(&f).wrap(move |args: A| {
        debug!("entering");
        let ret = f(args);
        debug!("leaving");
        ret
    })
}

fn run(demo: Demo, project_settings: &Settings) {
    match demo {
        Demo::All => {}
        Demo::StartEnd => {
            let add =
                LogStartEnd::with_options(sink::stdout(), project_settings.start_end).wrap(add);
            let sum = add.call((1, kw("b", 2)));
            info!(sum, "start-end demo finished");
        }
        Demo::ArgsReturn => {
            let calculator = Calculator { offset: 10 };
            calculator.add(project_settings, 1, 2);
            Calculator::scaled(project_settings, 2, 3);
            Calculator::halves(project_settings, 7);
        }
        Demo::Traceback => {
            let parse_port = log_traceback(sink::error()).wrap(parse_port);
            if let Err(e) = parse_port.call(("eighty",)) {
                warn!("port rejected: {}", e);
            }
        }
        Demo::LoggingParams => {
            let greet = traced(greet);
            info!(greeting = %greet.call(("world",)));
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logger = Logger::new_bootstrap()?;

    let project_settings = parse_settings(cli.settings.as_deref())?;
    info!(?project_settings);
    let logger_config = LogConfig {
        filter: project_settings.log.filter.clone(),
    };
    logger.reload_from_config(&logger_config)?;

    let demos = match cli.demo {
        Demo::All => vec![
            Demo::StartEnd,
            Demo::ArgsReturn,
            Demo::Traceback,
            Demo::LoggingParams,
        ],
        demo => vec![demo],
    };
    for demo in demos {
        run(demo, &project_settings);
    }

    Ok(())
}
