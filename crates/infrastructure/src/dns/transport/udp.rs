//! UDP upstream exchange (RFC 1035 §4.2.1).
//!
//! Each exchange opens its own connected socket on an ephemeral port, so no
//! state is shared between concurrent queries. The deadline covers the whole
//! round trip: send, and every receive until a matching reply shows up.

use async_trait::async_trait;
use ferrous_relay_application::ports::UpstreamPort;
use ferrous_relay_domain::DomainError;
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Large enough for EDNS(0) answers from resolvers that ignore the 512-byte limit.
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    fn unavailable(&self, context: &str, e: io::Error) -> DomainError {
        DomainError::UpstreamUnavailable {
            server: self.server_addr.to_string(),
            reason: format!("{}: {}", context, e),
        }
    }

    async fn round_trip(&self, query: &[u8]) -> Result<Vec<u8>, DomainError> {
        let bind_addr: SocketAddr = if self.server_addr.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| self.unavailable("bind failed", e))?;
        socket
            .connect(self.server_addr)
            .await
            .map_err(|e| self.unavailable("connect failed", e))?;

        let bytes_sent = socket
            .send(query)
            .await
            .map_err(|e| self.unavailable("send failed", e))?;

        debug!(server = %self.server_addr, bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        loop {
            let bytes_received = socket
                .recv(&mut recv_buf)
                .await
                .map_err(|e| self.unavailable("receive failed", e))?;

            let reply = &recv_buf[..bytes_received];
            if validate_response_id(query, reply) {
                debug!(server = %self.server_addr, bytes_received, "UDP response received");
                recv_buf.truncate(bytes_received);
                return Ok(recv_buf);
            }

            warn!(
                server = %self.server_addr,
                bytes_received,
                "Discarding UDP reply with mismatched transaction ID"
            );
        }
    }
}

#[async_trait]
impl UpstreamPort for UdpTransport {
    async fn exchange(&self, query: &[u8], timeout: Duration) -> Result<Vec<u8>, DomainError> {
        tokio::time::timeout(timeout, self.round_trip(query))
            .await
            .map_err(|_| DomainError::UpstreamTimeout {
                server: self.server_addr.to_string(),
            })?
    }

    fn server(&self) -> String {
        self.server_addr.to_string()
    }
}

/// True when `reply` carries the transaction ID of `query` and the QR bit.
pub fn validate_response_id(query: &[u8], reply: &[u8]) -> bool {
    if query.len() < 2 || reply.len() < 3 {
        return false;
    }
    query[..2] == reply[..2] && reply[2] & 0x80 != 0
}
