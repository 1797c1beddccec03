use async_trait::async_trait;
use mdns64_application::ports::{Ipv4Response, MulticastEndpoint, ResponseSubscription};
use mdns64_application::use_cases::relay::wire;
use mdns64_domain::DomainError;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::broadcast;

const RESPONDER_ADDR: &str = "192.168.1.50:5353";

/// In-memory endpoint: records every send and plays scripted IPv4 replies
/// as soon as a query is forwarded.
pub struct MockMulticastEndpoint {
    responses: broadcast::Sender<Ipv4Response>,
    replies: Mutex<Vec<Vec<u8>>>,
    sent_ipv4: Mutex<Vec<Vec<u8>>>,
    sent_ipv6: Mutex<Vec<Vec<u8>>>,
    fail_ipv4_send: AtomicBool,
    fail_ipv6_send: AtomicBool,
}

impl MockMulticastEndpoint {
    pub fn new() -> Self {
        let (responses, _) = broadcast::channel(16);
        Self {
            responses,
            replies: Mutex::new(Vec::new()),
            sent_ipv4: Mutex::new(Vec::new()),
            sent_ipv6: Mutex::new(Vec::new()),
            fail_ipv4_send: AtomicBool::new(false),
            fail_ipv6_send: AtomicBool::new(false),
        }
    }

    pub fn with_ipv4_replies(self, packets: Vec<Vec<u8>>) -> Self {
        *self.replies.lock().unwrap() = packets;
        self
    }

    pub fn set_fail_ipv4_send(&self, fail: bool) {
        self.fail_ipv4_send.store(fail, Ordering::Relaxed);
    }

    pub fn set_fail_ipv6_send(&self, fail: bool) {
        self.fail_ipv6_send.store(fail, Ordering::Relaxed);
    }

    pub fn sent_ipv4(&self) -> Vec<Vec<u8>> {
        self.sent_ipv4.lock().unwrap().clone()
    }

    pub fn sent_ipv6(&self) -> Vec<Vec<u8>> {
        self.sent_ipv6.lock().unwrap().clone()
    }

    fn play_replies(&self) {
        let source: SocketAddr = RESPONDER_ADDR.parse().unwrap();
        let replies = std::mem::take(&mut *self.replies.lock().unwrap());
        for packet in replies {
            let message = wire::decode(&packet).expect("scripted reply must decode");
            let _ = self.responses.send(Ipv4Response {
                source,
                message: Arc::new(message),
            });
        }
    }
}

impl Default for MockMulticastEndpoint {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MulticastEndpoint for MockMulticastEndpoint {
    async fn recv_ipv6(&self, _buf: &mut [u8]) -> Result<(usize, SocketAddr), DomainError> {
        std::future::pending().await
    }

    async fn send_ipv4(&self, packet: &[u8], _timeout: Duration) -> Result<(), DomainError> {
        if self.fail_ipv4_send.load(Ordering::Relaxed) {
            return Err(DomainError::SendFailed {
                group: "224.0.0.251:5353".to_string(),
                reason: "network unreachable".to_string(),
            });
        }
        self.sent_ipv4.lock().unwrap().push(packet.to_vec());
        self.play_replies();
        Ok(())
    }

    async fn send_ipv6(&self, packet: &[u8]) -> Result<(), DomainError> {
        if self.fail_ipv6_send.load(Ordering::Relaxed) {
            return Err(DomainError::SendFailed {
                group: "[ff02::fb]:5353".to_string(),
                reason: "network unreachable".to_string(),
            });
        }
        self.sent_ipv6.lock().unwrap().push(packet.to_vec());
        Ok(())
    }

    fn subscribe_ipv4_responses(&self) -> ResponseSubscription {
        self.responses.subscribe()
    }
}
