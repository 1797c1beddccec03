use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::relay::{MulticastGroups, RelayTimeouts};

/// Receive buffer per datagram. Larger mDNS packets are truncated.
pub const DEFAULT_RECV_BUFFER_SIZE: usize = 4096;

/// Smallest buffer that still holds a full classic DNS message.
const MIN_RECV_BUFFER_SIZE: usize = 512;

/// Main configuration structure for the relay
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Network interface both multicast sockets are bound to
    pub interface: String,

    /// IPv4 and IPv6 mDNS groups
    pub groups: MulticastGroups,

    /// Forward and response deadlines of a relay task
    pub timeouts: RelayTimeouts,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Size of each receive buffer in bytes
    pub recv_buffer_size: usize,
}

impl RelayConfig {
    pub fn new(interface: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
            groups: MulticastGroups::default(),
            timeouts: RelayTimeouts::default(),
            logging: LoggingConfig::default(),
            recv_buffer_size: DEFAULT_RECV_BUFFER_SIZE,
        }
    }

    /// Build the configuration for `interface` and apply command-line overrides
    pub fn load(
        interface: impl Into<String>,
        cli_overrides: CliOverrides,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::new(interface);
        config.apply_cli_overrides(cli_overrides)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) -> Result<(), ConfigError> {
        if let Some(level) = overrides.log_level {
            self.logging.level = level.parse()?;
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interface.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Interface name cannot be empty".to_string(),
            ));
        }

        if self.timeouts.forward_send.is_zero() || self.timeouts.response_wait.is_zero() {
            return Err(ConfigError::Validation(
                "Relay timeouts must be greater than zero".to_string(),
            ));
        }

        if self.recv_buffer_size < MIN_RECV_BUFFER_SIZE {
            return Err(ConfigError::Validation(format!(
                "Receive buffer must be at least {} bytes",
                MIN_RECV_BUFFER_SIZE
            )));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub log_level: Option<String>,
}
