pub mod cache;
pub mod events;
pub mod server;
pub mod transport;

pub use cache::{AnswerCache, CacheMetrics};
pub use events::{MetricsSnapshot, QueryMetrics};
pub use server::DnsServerHandler;
pub use transport::{resolve_upstream, UdpTransport};
