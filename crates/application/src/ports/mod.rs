mod answer_cache;
mod query_observer;
mod upstream;

pub use answer_cache::AnswerCachePort;
pub use query_observer::{NoopObserver, QueryObserver, QueryOutcome};
pub use upstream::UpstreamPort;
