use std::io::{self, Write};

use anyhow::Context;
use rerank_probe::{ProbeConfig, rerank};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_SERVICE_URL: &str = "http://10.0.20.73:8182";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let config = load_config()?;
    info!(base_url = %config.base_url, top_n = config.top_n, "probing rerank service");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    rerank(&config, &mut out).await.context("writing report")?;
    out.flush().context("flushing report")?;
    Ok(())
}

fn load_config() -> anyhow::Result<ProbeConfig> {
    let mut config = match std::env::var("RERANK_PROBE_CONFIG") {
        Ok(path) => {
            ProbeConfig::from_file(&path).with_context(|| format!("loading config {path}"))?
        }
        Err(_) => ProbeConfig::new(DEFAULT_SERVICE_URL),
    };
    if let Ok(base_url) = std::env::var("RERANK_PROBE_BASE_URL") {
        config.base_url = base_url;
    }
    Ok(config)
}
