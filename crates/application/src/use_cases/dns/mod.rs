mod handle_dns_query;

pub use handle_dns_query::{HandleDnsQueryUseCase, DEFAULT_UPSTREAM_TIMEOUT};
