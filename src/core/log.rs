// Define a new module for logging initialization
use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

pub fn init_logging(verbose: bool) {
    let env_directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::registry()
        .with(fmt::layer().pretty().without_time().with_writer(std::io::stderr))
        .with(log_filter(verbose, env_directives.as_deref()))
        .init();
}

/// `RUST_LOG` directives apply as given; `--verbose` adds debug output for
/// this crate on top of them. With neither, logging is off.
pub(crate) fn log_filter(verbose: bool, env_directives: Option<&str>) -> EnvFilter {
    let env_directives = env_directives.map(str::trim).filter(|d| !d.is_empty());
    match (env_directives, verbose) {
        (Some(directives), true) => EnvFilter::new(format!("{directives},curconv=debug")),
        (Some(directives), false) => EnvFilter::new(directives),
        (None, true) => EnvFilter::new("curconv=debug"),
        (None, false) => EnvFilter::new("off"),
    }
}
