use async_trait::async_trait;
use ferrous_relay_domain::DomainError;
use std::time::Duration;

/// Port for the single upstream resolver misses are forwarded to.
#[async_trait]
pub trait UpstreamPort: Send + Sync {
    /// Sends `query` unmodified and returns the raw response bytes.
    ///
    /// Each call uses its own connection and must give up after `timeout`.
    async fn exchange(&self, query: &[u8], timeout: Duration) -> Result<Vec<u8>, DomainError>;

    /// Human-readable server address for logs.
    fn server(&self) -> String;
}
