use async_trait::async_trait;
use hickory_proto::op::Message;
use mdns64_domain::DomainError;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

/// A decoded DNS response seen on the IPv4 mDNS group.
#[derive(Debug, Clone)]
pub struct Ipv4Response {
    pub source: SocketAddr,
    pub message: Arc<Message>,
}

/// Receiving half of the IPv4 response fan-out.
pub type ResponseSubscription = broadcast::Receiver<Ipv4Response>;

/// The pair of multicast sockets shared by every relay task.
///
/// Implementations must allow concurrent calls from many tasks without
/// external locking.
#[async_trait]
pub trait MulticastEndpoint: Send + Sync {
    /// Wait, without a deadline, for the next datagram on the IPv6 group.
    async fn recv_ipv6(&self, buf: &mut [u8]) -> Result<(usize, SocketAddr), DomainError>;

    /// Send `packet` to the IPv4 group, giving up after `timeout`.
    async fn send_ipv4(&self, packet: &[u8], timeout: Duration) -> Result<(), DomainError>;

    /// Send `packet` to the IPv6 group.
    async fn send_ipv6(&self, packet: &[u8]) -> Result<(), DomainError>;

    /// Register for every response that arrives on the IPv4 group from now on.
    fn subscribe_ipv4_responses(&self) -> ResponseSubscription;
}
