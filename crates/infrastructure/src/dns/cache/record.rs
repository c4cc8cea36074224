use std::net::Ipv4Addr;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachedAddress {
    pub address: Ipv4Addr,
    pub expires_at: Instant,
    pub ttl: u32,
}

impl CachedAddress {
    pub fn new(address: Ipv4Addr, ttl: u32, now: Instant) -> Self {
        Self {
            address,
            expires_at: now + Duration::from_secs(u64::from(ttl)),
            ttl,
        }
    }

    /// An entry is dead from its expiry instant onwards, so TTL 0 never hits.
    #[inline]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    #[inline]
    pub fn remaining_ttl_at(&self, now: Instant) -> u32 {
        self.expires_at.saturating_duration_since(now).as_secs() as u32
    }
}
