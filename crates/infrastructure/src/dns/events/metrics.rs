use ferrous_relay_application::ports::{QueryObserver, QueryOutcome};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Upper bounds, in seconds, of the latency histogram buckets (5 ms … 10 s).
pub const LATENCY_BUCKETS_SECS: [f64; 11] = [
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Fixed-bucket histogram. Bucket counts are not cumulative; the last slot
/// holds observations above the highest bound.
#[derive(Default)]
pub struct LatencyHistogram {
    buckets: [AtomicU64; LATENCY_BUCKETS_SECS.len() + 1],
    sum_micros: AtomicU64,
    count: AtomicU64,
}

impl LatencyHistogram {
    pub fn observe(&self, elapsed: Duration) {
        let secs = elapsed.as_secs_f64();
        let slot = LATENCY_BUCKETS_SECS
            .iter()
            .position(|bound| secs <= *bound)
            .unwrap_or(LATENCY_BUCKETS_SECS.len());

        self.buckets[slot].fetch_add(1, Ordering::Relaxed);
        self.sum_micros
            .fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn bucket_counts(&self) -> Vec<u64> {
        self.buckets
            .iter()
            .map(|b| b.load(Ordering::Relaxed))
            .collect()
    }

    pub fn mean(&self) -> Duration {
        let count = self.count();
        if count == 0 {
            return Duration::ZERO;
        }
        Duration::from_micros(self.sum_micros.load(Ordering::Relaxed) / count)
    }
}

/// In-process counters behind the query observer.
#[derive(Default)]
pub struct QueryMetrics {
    outcomes: [AtomicU64; QueryOutcome::ALL.len()],
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    datagrams_received: AtomicU64,
    send_failures: AtomicU64,
    latency: LatencyHistogram,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSnapshot {
    pub cache_hit: u64,
    pub forwarded: u64,
    pub malformed: u64,
    pub no_question: u64,
    pub upstream_failed: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub datagrams_received: u64,
    pub send_failures: u64,
    pub mean_latency: Duration,
    pub latency_buckets: Vec<u64>,
}

impl MetricsSnapshot {
    pub fn total_queries(&self) -> u64 {
        self.cache_hit + self.forwarded + self.malformed + self.no_question + self.upstream_failed
    }
}

impl QueryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(outcome: QueryOutcome) -> usize {
        QueryOutcome::ALL
            .iter()
            .position(|o| *o == outcome)
            .unwrap_or_default()
    }

    pub fn outcome_count(&self, outcome: QueryOutcome) -> u64 {
        self.outcomes[Self::slot(outcome)].load(Ordering::Relaxed)
    }

    pub fn record_datagram(&self) {
        self.datagrams_received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_send_failure(&self) {
        self.send_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn latency(&self) -> &LatencyHistogram {
        &self.latency
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            cache_hit: self.outcome_count(QueryOutcome::CacheHit),
            forwarded: self.outcome_count(QueryOutcome::Forwarded),
            malformed: self.outcome_count(QueryOutcome::Malformed),
            no_question: self.outcome_count(QueryOutcome::NoQuestion),
            upstream_failed: self.outcome_count(QueryOutcome::UpstreamFailed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            datagrams_received: self.datagrams_received.load(Ordering::Relaxed),
            send_failures: self.send_failures.load(Ordering::Relaxed),
            mean_latency: self.latency.mean(),
            latency_buckets: self.latency.bucket_counts(),
        }
    }
}

impl QueryObserver for QueryMetrics {
    fn on_cache_lookup(&self, hit: bool) {
        let counter = if hit {
            &self.cache_hits
        } else {
            &self.cache_misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn on_query_complete(&self, outcome: QueryOutcome, elapsed: Duration) {
        self.outcomes[Self::slot(outcome)].fetch_add(1, Ordering::Relaxed);
        self.latency.observe(elapsed);
    }
}
