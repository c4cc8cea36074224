use crate::ports::{AnswerCachePort, QueryObserver, QueryOutcome, UpstreamPort};
use ferrous_relay_domain::config::cache::DEFAULT_SYNTHESIZED_TTL;
use ferrous_relay_domain::wire::{
    build_cache_hit_response, scan_answers, Header, Question, HEADER_LEN,
};
use ferrous_relay_domain::DomainError;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(2);

/// Decides, for one raw query, between answering from cache and relaying
/// the upstream answer.
///
/// Only the first question of a packet is considered; further questions are
/// never answered. Any failure ends with no reply at all.
pub struct HandleDnsQueryUseCase {
    cache: Arc<dyn AnswerCachePort>,
    upstream: Arc<dyn UpstreamPort>,
    observer: Arc<dyn QueryObserver>,
    upstream_timeout: Duration,
    synthesized_ttl: u32,
    cache_enabled: bool,
}

impl HandleDnsQueryUseCase {
    pub fn new(
        cache: Arc<dyn AnswerCachePort>,
        upstream: Arc<dyn UpstreamPort>,
        observer: Arc<dyn QueryObserver>,
    ) -> Self {
        Self {
            cache,
            upstream,
            observer,
            upstream_timeout: DEFAULT_UPSTREAM_TIMEOUT,
            synthesized_ttl: DEFAULT_SYNTHESIZED_TTL,
            cache_enabled: true,
        }
    }

    pub fn with_upstream_timeout(mut self, timeout: Duration) -> Self {
        self.upstream_timeout = timeout;
        self
    }

    pub fn with_synthesized_ttl(mut self, ttl: u32) -> Self {
        self.synthesized_ttl = ttl;
        self
    }

    /// With the cache disabled every query is forwarded and nothing is stored.
    pub fn with_cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    /// Returns the bytes to send back to the client, or `None` to drop the query.
    pub async fn execute(&self, raw_query: &[u8]) -> Option<Vec<u8>> {
        let start = Instant::now();
        let result = self.resolve(raw_query).await;
        let elapsed = start.elapsed();

        match result {
            Ok((outcome, response)) => {
                self.observer.on_query_complete(outcome, elapsed);
                Some(response)
            }
            Err(e) => {
                let outcome = QueryOutcome::from_error(&e);
                if e.is_upstream_failure() {
                    warn!(error = %e, "Dropping query after upstream failure");
                } else {
                    debug!(error = %e, outcome = outcome.as_str(), "Dropping query");
                }
                self.observer.on_query_complete(outcome, elapsed);
                None
            }
        }
    }

    async fn resolve(&self, raw_query: &[u8]) -> Result<(QueryOutcome, Vec<u8>), DomainError> {
        let header = Header::decode(raw_query)?;
        if header.qd_count == 0 {
            return Err(DomainError::NoQuestion);
        }

        let (question, _) = Question::decode(raw_query, HEADER_LEN)?;

        debug!(
            id = header.id,
            domain = %question.name,
            qtype = question.qtype,
            questions = header.qd_count,
            "DNS query received"
        );

        if self.cache_enabled && question.is_address_query() {
            let cached = self.cache.lookup(&question.name);
            self.observer.on_cache_lookup(cached.is_some());

            if let Some(address) = cached {
                debug!(domain = %question.name, %address, "Cache hit");
                let response =
                    build_cache_hit_response(raw_query, address, self.synthesized_ttl)?;
                return Ok((QueryOutcome::CacheHit, response));
            }
        }

        let response = self
            .upstream
            .exchange(raw_query, self.upstream_timeout)
            .await?;

        if self.cache_enabled {
            let reply_header = self.capture_answers(&response)?;
            if reply_header.is_truncated() {
                debug!(domain = %question.name, "Upstream reply truncated, relaying as-is");
            }
        }

        debug!(
            domain = %question.name,
            upstream = %self.upstream.server(),
            bytes = response.len(),
            "Relaying upstream response"
        );

        Ok((QueryOutcome::Forwarded, response))
    }

    /// Stores every A answer in `response`. A record that fails to decode stops
    /// the walk; the ones stored before it are kept.
    fn capture_answers(&self, response: &[u8]) -> Result<Header, DomainError> {
        scan_answers(response, |record| {
            if let Some(address) = record.ipv4() {
                self.cache.store(&record.name, address, record.ttl);
                debug!(domain = %record.name, %address, ttl = record.ttl, "Cached A record");
            }
        })
    }
}
