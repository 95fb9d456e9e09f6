use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use report_core::config::COLLECTOR_CONFIG_ENV;
use report_core::{
    load_collector_config, save_artifact, validate_collector_config, HttpReportApi, PollPolicy,
    ReportCollector,
};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = std::env::var(COLLECTOR_CONFIG_ENV)
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let config = load_collector_config(config_path.as_deref())
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    validate_collector_config(&config).context("Configuration validation failed")?;

    info!(
        api_url = %config.api_url,
        offset = config.offset,
        retry_interval_ms = config.retry_interval_ms,
        deadline_ms = config.deadline_ms,
        "Collector configured"
    );

    let api = HttpReportApi::new(
        config.api_url.clone(),
        Duration::from_millis(config.request_timeout_ms),
    )
    .context("Failed to create HTTP client")?;

    let collector = ReportCollector::new(api, PollPolicy::from(&config));
    let artifact = collector
        .collect(config.offset)
        .await
        .context("Report collection failed")?;

    match &config.output_dir {
        Some(dir) => {
            let path = save_artifact(&artifact, dir, config.offset)
                .await
                .context("Failed to save report")?;
            info!(path = %path.display(), "Report collected");
        }
        None => {
            info!(bytes = artifact.body.len(), "Report collected:\n{}", artifact.text());
        }
    }

    Ok(())
}
