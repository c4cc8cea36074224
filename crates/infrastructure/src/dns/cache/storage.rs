use super::key::CacheKey;
use super::{CacheMetrics, CachedAddress};
use dashmap::DashMap;
use ferrous_relay_application::ports::AnswerCachePort;
use rustc_hash::FxBuildHasher;
use std::net::Ipv4Addr;
use std::sync::atomic::Ordering as AtomicOrdering;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Name → IPv4 answer cache shared by every query task.
///
/// There is no capacity bound and no background sweeper: an expired entry is
/// removed only when a lookup runs into it, and one that is never read again
/// stays resident.
pub struct AnswerCache {
    entries: DashMap<CacheKey, CachedAddress, FxBuildHasher>,
    metrics: Arc<CacheMetrics>,
}

impl AnswerCache {
    pub fn new() -> Self {
        info!("Initializing answer cache");
        Self {
            entries: DashMap::with_hasher(FxBuildHasher),
            metrics: Arc::new(CacheMetrics::default()),
        }
    }

    pub fn put(&self, domain: &str, address: Ipv4Addr, ttl: u32) {
        self.insert_at(domain, address, ttl, Instant::now());
    }

    pub fn get(&self, domain: &str) -> Option<Ipv4Addr> {
        self.get_at(domain, Instant::now())
    }

    /// Inserts or replaces the entry for `domain`; the last writer wins.
    pub fn insert_at(&self, domain: &str, address: Ipv4Addr, ttl: u32, now: Instant) {
        let key = CacheKey::new(domain);
        self.entries
            .insert(key, CachedAddress::new(address, ttl, now));
        self.metrics.insertions.fetch_add(1, AtomicOrdering::Relaxed);

        debug!(domain = %domain, %address, ttl, "Inserted answer into cache");
    }

    pub fn get_at(&self, domain: &str, now: Instant) -> Option<Ipv4Addr> {
        let key = CacheKey::new(domain);

        let expired = match self.entries.get(&key) {
            Some(entry) if !entry.is_expired_at(now) => {
                self.metrics.hits.fetch_add(1, AtomicOrdering::Relaxed);
                return Some(entry.address);
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            // The shard read guard is released by now; a writer may have
            // refreshed the entry in between, so only drop it if still stale.
            if self
                .entries
                .remove_if(&key, |_, record| record.is_expired_at(now))
                .is_some()
            {
                self.metrics
                    .lazy_deletions
                    .fetch_add(1, AtomicOrdering::Relaxed);
                debug!(domain = %domain, "Removed expired cache entry");
            }
        }

        self.metrics.misses.fetch_add(1, AtomicOrdering::Relaxed);
        None
    }

    /// Remaining lifetime of a live entry, without counting as a lookup.
    pub fn remaining_ttl_at(&self, domain: &str, now: Instant) -> Option<u32> {
        self.entries
            .get(&CacheKey::new(domain))
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| entry.remaining_ttl_at(now))
    }

    /// Number of resident entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn metrics(&self) -> Arc<CacheMetrics> {
        Arc::clone(&self.metrics)
    }
}

impl Default for AnswerCache {
    fn default() -> Self {
        Self::new()
    }
}

impl AnswerCachePort for AnswerCache {
    fn lookup(&self, name: &str) -> Option<Ipv4Addr> {
        self.get(name)
    }

    fn store(&self, name: &str, address: Ipv4Addr, ttl_secs: u32) {
        self.put(name, address, ttl_secs);
    }
}
