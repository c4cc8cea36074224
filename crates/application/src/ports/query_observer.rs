use ferrous_relay_domain::DomainError;
use std::time::Duration;

/// How handling of one inbound datagram ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryOutcome {
    CacheHit,
    Forwarded,
    Malformed,
    NoQuestion,
    UpstreamFailed,
}

impl QueryOutcome {
    pub const ALL: [QueryOutcome; 5] = [
        QueryOutcome::CacheHit,
        QueryOutcome::Forwarded,
        QueryOutcome::Malformed,
        QueryOutcome::NoQuestion,
        QueryOutcome::UpstreamFailed,
    ];

    pub fn from_error(error: &DomainError) -> Self {
        match error {
            DomainError::NoQuestion => QueryOutcome::NoQuestion,
            e if e.is_upstream_failure() => QueryOutcome::UpstreamFailed,
            _ => QueryOutcome::Malformed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CacheHit => "cache_hit",
            Self::Forwarded => "forwarded",
            Self::Malformed => "malformed",
            Self::NoQuestion => "no_question",
            Self::UpstreamFailed => "upstream_failed",
        }
    }

    /// Whether a reply was sent back to the client.
    pub fn answered(&self) -> bool {
        matches!(self, Self::CacheHit | Self::Forwarded)
    }
}

/// Fire-and-forget sink for per-query measurements.
pub trait QueryObserver: Send + Sync {
    fn on_cache_lookup(&self, hit: bool);

    fn on_query_complete(&self, outcome: QueryOutcome, elapsed: Duration);
}

/// Observer that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl QueryObserver for NoopObserver {
    fn on_cache_lookup(&self, _hit: bool) {}

    fn on_query_complete(&self, _outcome: QueryOutcome, _elapsed: Duration) {}
}
