#![allow(dead_code)]
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// An IPv4-only mDNS responder on loopback. It answers a query with a single
/// A record for the first question's name.
pub struct MockMdnsResponder {
    addr: SocketAddr,
    received: Arc<Mutex<Vec<Vec<u8>>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockMdnsResponder {
    /// Answers every name with `address`.
    pub async fn start(address: Ipv4Addr) -> Result<Self, std::io::Error> {
        Self::serve(move |_| Some(address)).await
    }

    /// Answers only the names in `hosts`, each with its own address.
    pub async fn start_with_hosts(hosts: &[(&str, Ipv4Addr)]) -> Result<Self, std::io::Error> {
        let hosts: Vec<(String, Ipv4Addr)> = hosts
            .iter()
            .map(|(name, address)| (name.trim_end_matches('.').to_ascii_lowercase(), *address))
            .collect();
        Self::serve(move |name| {
            hosts
                .iter()
                .find(|(host, _)| host == name)
                .map(|(_, address)| *address)
        })
        .await
    }

    async fn serve<F>(lookup: F) -> Result<Self, std::io::Error>
    where
        F: Fn(&str) -> Option<Ipv4Addr> + Send + 'static,
    {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let received = Arc::new(Mutex::new(Vec::new()));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let log = Arc::clone(&received);
        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            let query = buf[..len].to_vec();
                            log.lock().unwrap().push(query.clone());
                            let response = Self::first_question_text(&query)
                                .and_then(|name| lookup(&name))
                                .and_then(|address| Self::build_mock_response(&query, address));
                            if let Some(response) = response {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            received,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Every datagram received so far, verbatim.
    pub fn received(&self) -> Vec<Vec<u8>> {
        self.received.lock().unwrap().clone()
    }

    /// Multicast-style answer: ID 0, no question section, cache-flush class.
    pub fn build_mock_response(query: &[u8], address: Ipv4Addr) -> Option<Vec<u8>> {
        let name = Self::first_question_name(query)?;

        let mut response = Vec::with_capacity(64);
        response.extend_from_slice(&[0x00, 0x00]);
        response.extend_from_slice(&[0x84, 0x00]);
        response.extend_from_slice(&[0x00, 0x00]);
        response.extend_from_slice(&[0x00, 0x01]);
        response.extend_from_slice(&[0x00, 0x00]);
        response.extend_from_slice(&[0x00, 0x00]);

        response.extend_from_slice(name);
        response.extend_from_slice(&[
            0x00, 0x01, // A
            0x80, 0x01, // IN, cache flush
            0x00, 0x00, 0x00, 0x78, // ttl 120
            0x00, 0x04,
        ]);
        response.extend_from_slice(&address.octets());

        Some(response)
    }

    /// Uncompressed wire name of the first question, terminator included.
    fn first_question_name(query: &[u8]) -> Option<&[u8]> {
        if query.len() < 12 || query[2] & 0x80 != 0 || query[4..6] == [0, 0] {
            return None;
        }

        let mut pos = 12;
        loop {
            let len = *query.get(pos)? as usize;
            pos += 1;
            if len == 0 {
                return Some(&query[12..pos]);
            }
            pos += len;
        }
    }

    /// First question name as lowercase dotted text without the root dot.
    fn first_question_text(query: &[u8]) -> Option<String> {
        let wire_name = Self::first_question_name(query)?;
        let mut labels = Vec::new();
        let mut pos = 0;
        while wire_name[pos] != 0 {
            let len = wire_name[pos] as usize;
            let label = &wire_name[pos + 1..pos + 1 + len];
            labels.push(String::from_utf8_lossy(label).to_ascii_lowercase());
            pos += 1 + len;
        }
        Some(labels.join("."))
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockMdnsResponder {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
