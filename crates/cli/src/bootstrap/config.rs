use ferrous_relay_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    config.validate()?;
    Ok(config)
}

pub fn log_config(config: &Config) {
    info!(
        listen = %config.server.listen_addr(),
        upstream = %config.upstream.server,
        timeout_ms = config.upstream.timeout_ms,
        cache_enabled = config.cache.enabled,
        synthesized_ttl = config.cache.synthesized_ttl,
        "Configuration loaded"
    );
}
