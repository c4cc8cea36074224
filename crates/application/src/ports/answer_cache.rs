use std::net::Ipv4Addr;

/// Port for the shared name → address cache.
///
/// Implementations must be safe for concurrent use from many query tasks and
/// compare names case-insensitively.
pub trait AnswerCachePort: Send + Sync {
    /// Returns the live address for `name`, dropping it first if it has expired.
    fn lookup(&self, name: &str) -> Option<Ipv4Addr>;

    /// Stores `address` for `name` for `ttl_secs`, replacing any previous entry.
    fn store(&self, name: &str, address: Ipv4Addr, ttl_secs: u32);
}
