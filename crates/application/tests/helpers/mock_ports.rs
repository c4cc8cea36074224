use async_trait::async_trait;
use ferrous_relay_application::ports::{AnswerCachePort, QueryObserver, QueryOutcome, UpstreamPort};
use ferrous_relay_domain::DomainError;
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};
use std::time::Duration;

#[derive(Default)]
pub struct MockAnswerCache {
    entries: RwLock<HashMap<String, (Ipv4Addr, u32)>>,
    stores: AtomicUsize,
}

impl MockAnswerCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, name: &str, address: Ipv4Addr) -> Self {
        self.entries
            .write()
            .unwrap()
            .insert(name.to_ascii_lowercase(), (address, 300));
        self
    }

    pub fn ttl_of(&self, name: &str) -> Option<u32> {
        self.entries
            .read()
            .unwrap()
            .get(&name.to_ascii_lowercase())
            .map(|(_, ttl)| *ttl)
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn store_count(&self) -> usize {
        self.stores.load(Ordering::SeqCst)
    }
}

impl AnswerCachePort for MockAnswerCache {
    fn lookup(&self, name: &str) -> Option<Ipv4Addr> {
        self.entries
            .read()
            .unwrap()
            .get(&name.to_ascii_lowercase())
            .map(|(address, _)| *address)
    }

    fn store(&self, name: &str, address: Ipv4Addr, ttl_secs: u32) {
        self.stores.fetch_add(1, Ordering::SeqCst);
        self.entries
            .write()
            .unwrap()
            .insert(name.to_ascii_lowercase(), (address, ttl_secs));
    }
}

pub struct MockUpstream {
    response: Result<Vec<u8>, DomainError>,
    calls: Mutex<Vec<(Vec<u8>, Duration)>>,
}

impl MockUpstream {
    pub fn responding(bytes: Vec<u8>) -> Self {
        Self {
            response: Ok(bytes),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: DomainError) -> Self {
        Self {
            response: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn timing_out() -> Self {
        Self::failing(DomainError::UpstreamTimeout {
            server: "192.0.2.53:53".to_string(),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(Vec<u8>, Duration)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamPort for MockUpstream {
    async fn exchange(&self, query: &[u8], timeout: Duration) -> Result<Vec<u8>, DomainError> {
        self.calls.lock().unwrap().push((query.to_vec(), timeout));
        self.response.clone()
    }

    fn server(&self) -> String {
        "192.0.2.53:53".to_string()
    }
}

#[derive(Default)]
pub struct RecordingObserver {
    lookups: Mutex<Vec<bool>>,
    outcomes: Mutex<Vec<QueryOutcome>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookups(&self) -> Vec<bool> {
        self.lookups.lock().unwrap().clone()
    }

    pub fn outcomes(&self) -> Vec<QueryOutcome> {
        self.outcomes.lock().unwrap().clone()
    }
}

impl QueryObserver for RecordingObserver {
    fn on_cache_lookup(&self, hit: bool) {
        self.lookups.lock().unwrap().push(hit);
    }

    fn on_query_complete(&self, outcome: QueryOutcome, _elapsed: Duration) {
        self.outcomes.lock().unwrap().push(outcome);
    }
}
