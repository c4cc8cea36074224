pub mod key;
pub mod metrics;
pub mod record;
pub mod storage;

pub use key::CacheKey;
pub use metrics::CacheMetrics;
pub use record::CachedAddress;
pub use storage::AnswerCache;
