use clap::Parser;
use ferrous_relay_domain::CliOverrides;
use ferrous_relay_infrastructure::dns::{AnswerCache, QueryMetrics};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

const METRICS_REPORT_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Parser)]
#[command(name = "ferrous-relay")]
#[command(version)]
#[command(about = "Ferrous Relay - caching DNS forwarder")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Upstream resolver (host:port)
    #[arg(short = 'u', long)]
    upstream: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind,
        upstream: cli.upstream,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config.logging);

    info!("Starting Ferrous Relay v{}", env!("CARGO_PKG_VERSION"));
    bootstrap::log_config(&config);

    let dns_services = di::DnsServices::new(&config).await?;

    let reporter = tokio::spawn(report_metrics(
        dns_services.metrics.clone(),
        dns_services.cache.clone(),
    ));

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for shutdown signal");
        }
    };

    let result = server::start_dns_server(
        config.server.listen_addr(),
        dns_services.handler,
        dns_services.metrics.clone(),
        shutdown,
    )
    .await;

    reporter.abort();
    log_metrics(&dns_services.metrics, &dns_services.cache);

    if let Err(e) = &result {
        error!(error = %e, "DNS server error");
    }

    info!("Server shutdown complete");
    result
}

async fn report_metrics(metrics: Arc<QueryMetrics>, cache: Arc<AnswerCache>) {
    let mut interval = tokio::time::interval(METRICS_REPORT_INTERVAL);
    interval.tick().await;
    loop {
        interval.tick().await;
        log_metrics(&metrics, &cache);
    }
}

fn log_metrics(metrics: &QueryMetrics, cache: &AnswerCache) {
    let snapshot = metrics.snapshot();
    let cache_metrics = cache.metrics();

    info!(
        datagrams = snapshot.datagrams_received,
        queries = snapshot.total_queries(),
        cache_hit = snapshot.cache_hit,
        forwarded = snapshot.forwarded,
        malformed = snapshot.malformed,
        no_question = snapshot.no_question,
        upstream_failed = snapshot.upstream_failed,
        send_failures = snapshot.send_failures,
        mean_latency_us = snapshot.mean_latency.as_micros() as u64,
        cache_entries = cache.len(),
        cache_hit_rate = cache_metrics.hit_rate(),
        lazy_deletions = cache_metrics.lazy_deletions.load(Ordering::Relaxed),
        "Query metrics"
    );
}
