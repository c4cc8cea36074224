use ferrous_relay_domain::{DomainError, UpstreamAddr};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::info;

/// Turns the configured upstream into a socket address, looking hostnames up
/// once. The first address returned by the system resolver is used.
pub async fn resolve_upstream(
    upstream: &UpstreamAddr,
    timeout: Duration,
) -> Result<SocketAddr, DomainError> {
    if let Some(addr) = upstream.socket_addr() {
        return Ok(addr);
    }

    let target = upstream.to_string();
    let mut addrs = tokio::time::timeout(timeout, tokio::net::lookup_host(target.as_str()))
        .await
        .map_err(|_| DomainError::UpstreamTimeout {
            server: target.clone(),
        })?
        .map_err(|e| DomainError::UpstreamUnavailable {
            server: target.clone(),
            reason: format!("name resolution failed: {}", e),
        })?;

    let addr = addrs.next().ok_or_else(|| DomainError::UpstreamUnavailable {
        server: target.clone(),
        reason: "name resolved to no addresses".to_string(),
    })?;

    info!(upstream = %target, resolved = %addr, "Resolved upstream hostname");
    Ok(addr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_literal_address_is_returned_as_is() {
        let upstream: UpstreamAddr = "192.0.2.1:5353".parse().unwrap();
        let addr = resolve_upstream(&upstream, Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(addr, "192.0.2.1:5353".parse::<SocketAddr>().unwrap());
    }

    #[tokio::test]
    async fn test_localhost_resolves() {
        let upstream: UpstreamAddr = "localhost:53".parse().unwrap();
        let addr = resolve_upstream(&upstream, Duration::from_secs(2))
            .await
            .unwrap();
        assert_eq!(addr.port(), 53);
        assert!(addr.ip().is_loopback());
    }
}
