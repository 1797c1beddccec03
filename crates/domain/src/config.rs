pub mod errors;
pub mod logging;
pub mod relay;
pub mod root;

pub use errors::ConfigError;
pub use logging::{LogLevel, LoggingConfig};
pub use relay::{MulticastGroups, RelayTimeouts, MDNS_GROUP_V4, MDNS_GROUP_V6, MDNS_PORT};
pub use root::{CliOverrides, RelayConfig, DEFAULT_RECV_BUFFER_SIZE};
