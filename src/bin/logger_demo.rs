use funclog::logger::*;
use funclog::{Decorator, wraps_logging_params};

fn work((step,): (u32,)) -> u32 {
    debug!(step, "working");
    step + 1
}

fn main() -> anyhow::Result<()> {
    let logger = Logger::new_bootstrap()?;
    trace!("bootstrap trace log");
    debug!("bootstrap debug log");
    info!("bootstrap info log");

    let config = LogConfig { filter: "debug".to_string() };
    logger.reload_from_config(&config)?;
    trace!("application trace log");
    debug!("application debug log");
    info!("application info log");

    // Events inside `work` are attributed to this file and `work`
    let work = wraps_logging_params(&work).wrap(work);
    let next = work.call((1,));
    info!(next, "attributed call finished");

    let is_err = logger
        .reload_from_config(&LogConfig { filter: "[".to_string() })
        .is_err();
    info!(is_err, "invalid filter rejected");

    Ok(())
}
