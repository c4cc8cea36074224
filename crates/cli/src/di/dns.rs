use ferrous_relay_application::use_cases::HandleDnsQueryUseCase;
use ferrous_relay_domain::Config;
use ferrous_relay_infrastructure::dns::{
    resolve_upstream, AnswerCache, DnsServerHandler, QueryMetrics, UdpTransport,
};
use std::sync::Arc;
use tracing::{info, warn};

pub struct DnsServices {
    pub cache: Arc<AnswerCache>,
    pub metrics: Arc<QueryMetrics>,
    pub handler: DnsServerHandler,
}

impl DnsServices {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let upstream_addr = config.upstream.addr()?;
        let timeout = config.upstream.timeout();
        let server_addr = resolve_upstream(&upstream_addr, timeout).await?;

        info!(upstream = %server_addr, timeout_ms = config.upstream.timeout_ms, "Upstream resolver ready");

        if !config.cache.enabled {
            warn!("Answer cache disabled, every query will be forwarded");
        }

        let cache = Arc::new(AnswerCache::new());
        let metrics = Arc::new(QueryMetrics::new());
        let use_case = HandleDnsQueryUseCase::new(
            cache.clone(),
            Arc::new(UdpTransport::new(server_addr)),
            metrics.clone(),
        )
        .with_upstream_timeout(timeout)
        .with_synthesized_ttl(config.cache.synthesized_ttl)
        .with_cache_enabled(config.cache.enabled);

        Ok(Self {
            cache,
            metrics,
            handler: DnsServerHandler::new(Arc::new(use_case)),
        })
    }
}
