//! Logging setup.

/// Initializes `env_logger`.
///
/// `--verbose` enables debug output for this crate; otherwise only warnings
/// are shown. `RUST_LOG` still takes precedence when set.
pub fn init_logger(verbose: bool) {
    let level = if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Warn };
    env_logger::Builder::new()
        .filter_module(env!("CARGO_CRATE_NAME"), level)
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
