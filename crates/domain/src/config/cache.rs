use serde::{Deserialize, Serialize};

/// TTL written into answers synthesized from the cache. It is a fixed value,
/// not the entry's remaining lifetime.
pub const DEFAULT_SYNTHESIZED_TTL: u32 = 300;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_synthesized_ttl")]
    pub synthesized_ttl: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            synthesized_ttl: DEFAULT_SYNTHESIZED_TTL,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_synthesized_ttl() -> u32 {
    DEFAULT_SYNTHESIZED_TTL
}
