use hickory_proto::op::MessageType;
use mdns64_application::ports::Ipv4Response;
use mdns64_application::use_cases::relay::wire;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Pause after a failed read so a persistent socket error cannot spin the loop.
const RECV_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// What the router did with one IPv4 datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Handed to the relay tasks currently subscribed.
    Broadcast { receivers: usize },
    /// Decoded as a response but no relay task was waiting.
    NoSubscribers,
    /// A query seen on the IPv4 group.
    DroppedQuery,
    /// Not a DNS message.
    DroppedMalformed,
}

/// Sole reader of the IPv4 group socket. Every response is fanned out to the
/// relay tasks, which pick their own answer.
pub struct Ipv4ResponseRouter {
    socket: Arc<UdpSocket>,
    responses: broadcast::Sender<Ipv4Response>,
    buffer_size: usize,
    shutdown: CancellationToken,
}

impl Ipv4ResponseRouter {
    pub fn new(
        socket: Arc<UdpSocket>,
        responses: broadcast::Sender<Ipv4Response>,
        buffer_size: usize,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            socket,
            responses,
            buffer_size,
            shutdown,
        }
    }

    pub async fn run(self) {
        let mut buf = vec![0u8; self.buffer_size];
        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("Ipv4ResponseRouter: shutting down");
                    break;
                }
                result = self.socket.recv_from(&mut buf) => match result {
                    Ok((len, source)) => {
                        route_datagram(&self.responses, &buf[..len], source);
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to read IPv4 response packet");
                        tokio::time::sleep(RECV_ERROR_BACKOFF).await;
                    }
                }
            }
        }
    }
}

/// Decode one IPv4 datagram and broadcast it if it is a response.
pub fn route_datagram(
    responses: &broadcast::Sender<Ipv4Response>,
    datagram: &[u8],
    source: SocketAddr,
) -> RouteDecision {
    let message = match wire::decode(datagram) {
        Ok(message) => message,
        Err(e) => {
            error!(src = %source, error = %e, "Failed to parse IPv4 response packet");
            return RouteDecision::DroppedMalformed;
        }
    };

    if message.message_type() == MessageType::Query {
        warn!(
            src = %source,
            questions = ?message.queries(),
            "Received a request when we wanted a response"
        );
        return RouteDecision::DroppedQuery;
    }

    debug!(src = %source, answers = message.answers().len(), "Received IPv4 response");

    match responses.send(Ipv4Response {
        source,
        message: Arc::new(message),
    }) {
        Ok(receivers) => RouteDecision::Broadcast { receivers },
        Err(_) => RouteDecision::NoSubscribers,
    }
}
