use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed packet: {0}")]
    MalformedPacket(String),

    #[error("Query has no question section")]
    NoQuestion,

    #[error("Upstream {server} unavailable: {reason}")]
    UpstreamUnavailable { server: String, reason: String },

    #[error("Timeout waiting for upstream {server}")]
    UpstreamTimeout { server: String },
}

impl DomainError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        DomainError::MalformedPacket(reason.into())
    }

    /// True for any failure talking to the upstream resolver, timeouts included.
    pub fn is_upstream_failure(&self) -> bool {
        matches!(
            self,
            DomainError::UpstreamUnavailable { .. } | DomainError::UpstreamTimeout { .. }
        )
    }
}
