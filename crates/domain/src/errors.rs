use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Network interface not found: {0}")]
    InterfaceNotFound(String),

    #[error("Network interface {name} cannot be used: {reason}")]
    InterfaceUnusable { name: String, reason: String },

    #[error("Failed to set up multicast socket for {group}: {reason}")]
    SocketSetup { group: String, reason: String },

    #[error("Invalid DNS message: {0}")]
    InvalidDnsMessage(String),

    #[error("Failed to serialize DNS message: {0}")]
    SerializeFailed(String),

    #[error("Timeout sending packet to {group}")]
    SendTimeout { group: String },

    #[error("Failed to send packet to {group}: {reason}")]
    SendFailed { group: String, reason: String },

    #[error("Failed to receive packet on {group}: {reason}")]
    ReceiveFailed { group: String, reason: String },

    #[error("No IPv4 response within {0:?}")]
    ResponseTimeout(Duration),

    #[error("IPv4 response channel closed")]
    ResponseChannelClosed,
}

impl DomainError {
    /// True for the quiet case where no IPv4 host answered the forwarded query.
    pub fn is_unanswered(&self) -> bool {
        matches!(self, DomainError::ResponseTimeout(_))
    }
}
