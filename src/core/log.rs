use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, Layer, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Installs the global subscriber on stderr, keeping stdout for tables.
///
/// Warnings such as a fallback to demo data are always shown in a compact form.
/// `--verbose` adds debug events with the pretty formatter. A `RUST_LOG`
/// directive replaces the level chosen by `--verbose`.
pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env().ok();
    let level_filter = app_level(verbose, env_filter.is_some());
    let app_filter = Targets::new().with_target("agrox", level_filter);
    let env_filter = env_filter.unwrap_or_else(|| EnvFilter::new(level_filter.to_string()));

    let fmt_layer = if verbose {
        fmt::layer()
            .pretty()
            .without_time()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        fmt::layer()
            .compact()
            .without_time()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(app_filter)
        .with(env_filter)
        .init();
}

// With RUST_LOG set, the crate target is left open and the env filter decides.
fn app_level(verbose: bool, env_directives: bool) -> LevelFilter {
    match (env_directives, verbose) {
        (true, _) => LevelFilter::TRACE,
        (false, true) => LevelFilter::DEBUG,
        (false, false) => LevelFilter::WARN,
    }
}
