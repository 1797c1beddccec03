use super::router::Ipv4ResponseRouter;
use super::socket::{open_ipv4_group_socket, open_ipv6_group_socket};
use crate::system::ResolvedInterface;
use async_trait::async_trait;
use mdns64_application::ports::{Ipv4Response, MulticastEndpoint, ResponseSubscription};
use mdns64_domain::{DomainError, RelayConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Responses buffered per relay task before it starts losing packets.
const RESPONSE_CHANNEL_CAPACITY: usize = 64;

/// The IPv4 and IPv6 mDNS sockets of one interface, shared by every relay task.
///
/// Creating an endpoint spawns the IPv4 response router; it stops when
/// `shutdown` is cancelled.
pub struct DualStackEndpoint {
    ipv4: Arc<UdpSocket>,
    ipv6: UdpSocket,
    ipv4_group: SocketAddr,
    ipv6_group: SocketAddr,
    responses: broadcast::Sender<Ipv4Response>,
}

impl DualStackEndpoint {
    /// Join both mDNS groups on `interface`.
    pub fn bind(
        config: &RelayConfig,
        interface: &ResolvedInterface,
        shutdown: CancellationToken,
    ) -> Result<Self, DomainError> {
        let groups = config.groups.with_scope_id(interface.index);
        let ipv4 = open_ipv4_group_socket(groups.ipv4, interface)?;
        let ipv6 = open_ipv6_group_socket(groups.ipv6, interface)?;

        info!(
            ipv4_group = %groups.ipv4,
            ipv6_group = %groups.ipv6,
            interface = %interface.name,
            "Multicast sockets ready"
        );

        Ok(Self::from_sockets(
            ipv4,
            ipv6,
            groups.ipv4.into(),
            groups.ipv6.into(),
            config.recv_buffer_size,
            shutdown,
        ))
    }

    /// Build an endpoint over already bound sockets. `ipv4_group` and
    /// `ipv6_group` are the send destinations.
    pub fn from_sockets(
        ipv4: UdpSocket,
        ipv6: UdpSocket,
        ipv4_group: SocketAddr,
        ipv6_group: SocketAddr,
        buffer_size: usize,
        shutdown: CancellationToken,
    ) -> Self {
        let ipv4 = Arc::new(ipv4);
        let (responses, _) = broadcast::channel(RESPONSE_CHANNEL_CAPACITY);

        let router = Ipv4ResponseRouter::new(
            Arc::clone(&ipv4),
            responses.clone(),
            buffer_size,
            shutdown,
        );
        tokio::spawn(router.run());

        Self {
            ipv4,
            ipv6,
            ipv4_group,
            ipv6_group,
            responses,
        }
    }

    pub fn ipv6_group(&self) -> SocketAddr {
        self.ipv6_group
    }
}

#[async_trait]
impl MulticastEndpoint for DualStackEndpoint {
    async fn recv_ipv6(&self, buf: &mut [u8]) -> Result<(usize, SocketAddr), DomainError> {
        self.ipv6
            .recv_from(buf)
            .await
            .map_err(|e| DomainError::ReceiveFailed {
                group: self.ipv6_group.to_string(),
                reason: e.to_string(),
            })
    }

    async fn send_ipv4(&self, packet: &[u8], timeout: Duration) -> Result<(), DomainError> {
        let bytes_sent = tokio::time::timeout(timeout, self.ipv4.send_to(packet, self.ipv4_group))
            .await
            .map_err(|_| DomainError::SendTimeout {
                group: self.ipv4_group.to_string(),
            })?
            .map_err(|e| DomainError::SendFailed {
                group: self.ipv4_group.to_string(),
                reason: e.to_string(),
            })?;

        debug!(group = %self.ipv4_group, bytes_sent, "Forwarded query to IPv4 group");
        Ok(())
    }

    async fn send_ipv6(&self, packet: &[u8]) -> Result<(), DomainError> {
        let bytes_sent = self
            .ipv6
            .send_to(packet, self.ipv6_group)
            .await
            .map_err(|e| DomainError::SendFailed {
                group: self.ipv6_group.to_string(),
                reason: e.to_string(),
            })?;

        debug!(group = %self.ipv6_group, bytes_sent, "Published response to IPv6 group");
        Ok(())
    }

    fn subscribe_ipv4_responses(&self) -> ResponseSubscription {
        self.responses.subscribe()
    }
}
