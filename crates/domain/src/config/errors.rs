#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid log level {0:?}: expected one of debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}
