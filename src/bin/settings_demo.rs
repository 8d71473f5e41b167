use funclog::decorator::{LogArgsReturn, LogStartEnd};
use funclog::settings::*;
use funclog::{Decorator, Kw, kw, sink};

fn scale((value, factor): (i32, Kw<i32>)) -> Vec<i32> {
    vec![value, value * *factor]
}

/// Runs `scale` under the decorator options of `project_settings`.
fn decorate_with(project_settings: &Settings) {
    let scale = LogStartEnd::with_options(sink::stdout(), project_settings.start_end)
        .stack(LogArgsReturn::with_options(
            sink::stdout(),
            project_settings.args_return,
        ))
        .wrap(scale)
        .named("scale");
    scale.call((3, kw("factor", 2)));
}

fn main() -> anyhow::Result<()> {
    // Default location: multi-line args/return blocks
    let project_settings = parse_settings(None)?;
    decorate_with(&project_settings);

    // An invalid path is rejected
    println!("Error on invalid path: {}", parse_settings(Some("")).is_err());

    // $ cargo run --bin settings_demo -- --settings=settings/release.toml
    // prints `scale args: 3, factor=2` and `scale return: 3, 6` instead
    let cli = Cli::parse();
    let project_settings = parse_settings(cli.settings.as_deref())?;
    decorate_with(&project_settings);

    Ok(())
}
