use mdns64_domain::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Install the global `fmt` subscriber. The configured level is the only
/// filter; `RUST_LOG` is ignored.
pub fn init_logging(config: &LoggingConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.level.as_str()))
        .with_target(false)
        .init();
}
