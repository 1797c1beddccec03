use crate::ports::{Ipv4Response, ResponseSubscription};
use hickory_proto::op::Message;
use hickory_proto::rr::Name;
use mdns64_domain::DomainError;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, warn};

/// Waits for the IPv4 answer to one forwarded query.
///
/// The deadline covers the whole wait: responses to other queries are
/// discarded without extending it.
pub struct ResponseCollector {
    wait: Duration,
}

impl ResponseCollector {
    pub fn new(wait: Duration) -> Self {
        Self { wait }
    }

    pub async fn collect(
        &self,
        subscription: &mut ResponseSubscription,
        query: &Message,
    ) -> Result<Ipv4Response, DomainError> {
        let deadline = Instant::now() + self.wait;

        loop {
            let received = timeout_at(deadline, subscription.recv())
                .await
                .map_err(|_| DomainError::ResponseTimeout(self.wait))?;

            match received {
                Ok(response) if response_matches_query(query, &response.message) => {
                    return Ok(response);
                }
                Ok(response) => {
                    debug!(
                        src = %response.source,
                        id = response.message.id(),
                        "Ignoring IPv4 response to another query"
                    );
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "IPv4 response subscriber lagged behind");
                }
                Err(RecvError::Closed) => return Err(DomainError::ResponseChannelClosed),
            }
        }
    }
}

/// Whether `response` answers `query`.
///
/// mDNS responders usually send ID 0 on multicast answers and often omit the
/// question section, so a match is any of: the same non-zero ID, an echoed
/// question name, or a record owned by one of the queried names. Name
/// comparison is case-insensitive.
pub fn response_matches_query(query: &Message, response: &Message) -> bool {
    if query.id() != 0 && response.id() == query.id() {
        return true;
    }

    let asked: Vec<&Name> = query.queries().iter().map(|q| q.name()).collect();
    let is_asked = |name: &Name| asked.iter().any(|candidate| *candidate == name);

    response.queries().iter().any(|q| is_asked(q.name()))
        || response
            .answers()
            .iter()
            .chain(response.additionals())
            .any(|record| is_asked(record.name()))
}
