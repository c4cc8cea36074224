use ferrous_relay_application::use_cases::HandleDnsQueryUseCase;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::debug;

/// Entry point from the receive loop into the resolution engine.
#[derive(Clone)]
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    /// Returns the reply for one inbound datagram, or `None` when the query is
    /// dropped.
    pub async fn handle_datagram(&self, datagram: &[u8], client: SocketAddr) -> Option<Vec<u8>> {
        let response = self.use_case.execute(datagram).await;
        if response.is_none() {
            debug!(client = %client, bytes = datagram.len(), "No reply for datagram");
        }
        response
    }
}
