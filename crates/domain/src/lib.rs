//! mdns64 Domain Layer
pub mod config;
pub mod errors;
pub mod nat64;

pub use config::{
    CliOverrides, ConfigError, LogLevel, LoggingConfig, MulticastGroups, RelayConfig,
    RelayTimeouts,
};
pub use errors::DomainError;
pub use nat64::{synthesize_nat64, NAT64_WELL_KNOWN_PREFIX};
