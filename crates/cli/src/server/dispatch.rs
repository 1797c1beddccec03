use mdns64_application::ports::MulticastEndpoint;
use mdns64_application::use_cases::{RelayOutcome, RelayQueryUseCase};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Read the IPv6 group until `shutdown` is cancelled, spawning one relay task
/// per datagram. Spawned tasks are never awaited.
pub async fn run_dispatch_loop(
    endpoint: Arc<dyn MulticastEndpoint>,
    relay: Arc<RelayQueryUseCase>,
    buffer_size: usize,
    shutdown: CancellationToken,
) {
    loop {
        // Fresh buffer per datagram: the task owns it after the spawn.
        let mut buf = vec![0u8; buffer_size];

        let (len, source) = tokio::select! {
            _ = shutdown.cancelled() => {
                info!("Dispatch loop: shutting down");
                break;
            }
            result = endpoint.recv_ipv6(&mut buf) => match result {
                Ok(received) => received,
                Err(e) => {
                    error!(error = %e, "Failed to read packet");
                    continue;
                }
            }
        };

        buf.truncate(len);
        let relay = Arc::clone(&relay);
        tokio::spawn(async move {
            relay_datagram(&relay, &buf, source).await;
        });
    }
}

async fn relay_datagram(relay: &RelayQueryUseCase, datagram: &[u8], source: SocketAddr) {
    match relay.execute(datagram, source).await {
        Ok(RelayOutcome::Published { synthesized }) => {
            debug!(src = %source, synthesized, "Relay published NAT64 response");
        }
        Ok(outcome) => {
            debug!(src = %source, ?outcome, "Relay finished without publishing");
        }
        Err(e) if e.is_unanswered() => {
            warn!(src = %source, error = %e, "No IPv4 response for relayed query");
        }
        Err(e) => {
            error!(src = %source, error = %e, "Relay failed");
        }
    }
}
