use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

#[derive(Debug, Clone, Copy)]
pub enum MockBehavior {
    /// Reply with one A record for the queried name.
    Answer { address: Ipv4Addr, ttl: u32 },
    /// Read queries and never reply.
    Silent,
    /// Send a reply with the wrong transaction ID first, then the real answer.
    WrongIdFirst { address: Ipv4Addr, ttl: u32 },
}

/// Upstream stand-in on a loopback UDP socket with an OS-assigned port.
pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(behavior: MockBehavior) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let queries = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&queries);

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { continue };
                        counter.fetch_add(1, Ordering::SeqCst);
                        let query = &buf[..len];

                        match behavior {
                            MockBehavior::Answer { address, ttl } => {
                                let response = Self::build_mock_response(query, address, ttl);
                                let _ = socket.send_to(&response, peer).await;
                            }
                            MockBehavior::Silent => {}
                            MockBehavior::WrongIdFirst { address, ttl } => {
                                let mut stray = Self::build_mock_response(query, address, ttl);
                                if stray.len() >= 2 {
                                    stray[1] = stray[1].wrapping_add(1);
                                }
                                let _ = socket.send_to(&stray, peer).await;
                                let response = Self::build_mock_response(query, address, ttl);
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// The query's header and question section, flags 0x8180, and one A
    /// answer whose owner name points at the question.
    pub fn build_mock_response(query: &[u8], address: Ipv4Addr, ttl: u32) -> Vec<u8> {
        if query.len() < 12 {
            return vec![];
        }

        let mut response = Vec::with_capacity(query.len() + 16);
        response.extend_from_slice(&query[0..2]);
        response.extend_from_slice(&[0x81, 0x80]);
        response.extend_from_slice(&query[4..6]);
        response.extend_from_slice(&[0x00, 0x01, 0x00, 0x00, 0x00, 0x00]);
        response.extend_from_slice(&query[12..]);

        response.extend_from_slice(&[0xC0, 0x0C, 0x00, 0x01, 0x00, 0x01]);
        response.extend_from_slice(&ttl.to_be_bytes());
        response.extend_from_slice(&[0x00, 0x04]);
        response.extend_from_slice(&address.octets());
        response
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
