//! DNS wire format helpers
//!
//! Thin wrappers over `hickory-proto` that map codec failures into
//! [`DomainError`]. The `mdns` feature keeps the QU bit of questions and the
//! cache-flush bit of records intact across a decode/encode cycle.

use hickory_proto::op::Message;
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use mdns64_domain::DomainError;

/// Parse one datagram into a DNS message
pub fn decode(bytes: &[u8]) -> Result<Message, DomainError> {
    Message::from_vec(bytes).map_err(|e| DomainError::InvalidDnsMessage(e.to_string()))
}

/// Serialize a message to wire format bytes
pub fn encode(message: &Message) -> Result<Vec<u8>, DomainError> {
    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);

    message
        .emit(&mut encoder)
        .map_err(|e| DomainError::SerializeFailed(e.to_string()))?;

    Ok(buf)
}
