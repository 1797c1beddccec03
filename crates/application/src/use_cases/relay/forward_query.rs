use super::wire;
use hickory_proto::op::{Message, MessageType};
use mdns64_domain::DomainError;

/// A query rewritten for the IPv4 group, with its encoded form.
#[derive(Debug, Clone)]
pub struct ForwardedQuery {
    pub message: Message,
    pub packet: Vec<u8>,
}

impl ForwardedQuery {
    /// Transaction ID the requester chose; restored on the published answer.
    pub fn id(&self) -> u16 {
        self.message.id()
    }
}

/// Turn an inbound IPv6 datagram into the query to re-issue over IPv4.
///
/// Returns `Ok(None)` for responses and for queries without questions, which
/// are never relayed. Only the first question is rewritten: its class gets
/// the top bit set, every other field is left as the requester sent it.
pub fn prepare_forward(datagram: &[u8]) -> Result<Option<ForwardedQuery>, DomainError> {
    let mut message = wire::decode(datagram)?;

    if message.message_type() == MessageType::Response || message.queries().is_empty() {
        return Ok(None);
    }

    let mut questions = message.take_queries();
    if let Some(first) = questions.first_mut() {
        first.set_mdns_unicast_response(true);
    }
    message.add_queries(questions);

    let packet = wire::encode(&message)?;
    Ok(Some(ForwardedQuery { message, packet }))
}
