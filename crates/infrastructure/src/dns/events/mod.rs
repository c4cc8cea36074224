pub mod metrics;

pub use metrics::{LatencyHistogram, MetricsSnapshot, QueryMetrics, LATENCY_BUCKETS_SECS};
