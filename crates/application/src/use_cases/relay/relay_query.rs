use super::{merge_synthesized, prepare_forward, synthesize_aaaa_records, wire, ResponseCollector};
use crate::ports::MulticastEndpoint;
use mdns64_domain::{DomainError, RelayTimeouts};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, info};

/// How a relay task ended when nothing went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    /// The datagram was a response or a query without questions.
    Ignored,
    /// The IPv4 answer already had AAAA records, or had no A records.
    NothingToSynthesize,
    /// The IPv4 answer was republished with `synthesized` extra AAAA records.
    Published { synthesized: usize },
}

/// One relay cycle for one inbound IPv6 datagram: forward the query over
/// IPv4, collect the answer, add NAT64 AAAA records, publish over IPv6.
///
/// Every error ends the cycle; nothing is retried.
pub struct RelayQueryUseCase {
    endpoint: Arc<dyn MulticastEndpoint>,
    timeouts: RelayTimeouts,
}

impl RelayQueryUseCase {
    pub fn new(endpoint: Arc<dyn MulticastEndpoint>, timeouts: RelayTimeouts) -> Self {
        Self { endpoint, timeouts }
    }

    pub async fn execute(
        &self,
        datagram: &[u8],
        source: SocketAddr,
    ) -> Result<RelayOutcome, DomainError> {
        let Some(forward) = prepare_forward(datagram)? else {
            return Ok(RelayOutcome::Ignored);
        };
        debug!(
            questions = ?forward.message.queries(),
            from = %source,
            "Received question"
        );

        // Subscribe before sending so a fast answer cannot slip past.
        let mut responses = self.endpoint.subscribe_ipv4_responses();
        self.endpoint
            .send_ipv4(&forward.packet, self.timeouts.forward_send)
            .await?;

        let collector = ResponseCollector::new(self.timeouts.response_wait);
        let response = collector.collect(&mut responses, &forward.message).await?;
        debug!(
            src = %response.source,
            answers = response.message.answers().len(),
            "Received IPv4 response"
        );

        let synthesized = synthesize_aaaa_records(&response.message);
        for record in &synthesized {
            info!(aaaa = %record, to = %source, "Responding with synthesised NAT64 address");
        }
        let count = synthesized.len();

        let Some(publication) = merge_synthesized(forward.id(), &response.message, synthesized)
        else {
            return Ok(RelayOutcome::NothingToSynthesize);
        };

        let packet = wire::encode(&publication)?;
        self.endpoint.send_ipv6(&packet).await?;

        Ok(RelayOutcome::Published { synthesized: count })
    }
}
