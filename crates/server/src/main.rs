use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use report_core::config::APIS_CONFIG_ENV;
use report_core::{
    load_apis_config, validate_apis_config, OverloadFlag, OverloadToggler, ReportIssuer,
    SyntheticReportGenerator, ToggleCallback, UuidIdentitySource,
};

use report_apis::api::create_router;
use report_apis::metrics::{record_gate_toggle, GATE_OVERLOADED};
use report_apis::state::AppState;

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
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Config file is optional; defaults and env cover everything
    let config_path = std::env::var(APIS_CONFIG_ENV)
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    info!("Loading configuration (file: {:?})", config_path);
    let config = load_apis_config(config_path.as_deref())
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    validate_apis_config(&config).context("Configuration validation failed")?;

    info!(
        rows = config.report.rows,
        latency_ms = config.report.latency_ms,
        gate_enabled = config.gate.enabled,
        toggle_interval_ms = config.gate.toggle_interval_ms,
        "Configuration loaded successfully"
    );

    // Overload flag shared by the issuer and the toggler
    let flag = OverloadFlag::new(config.gate.initially_overloaded);
    GATE_OVERLOADED.set(if config.gate.initially_overloaded { 1 } else { 0 });

    let issuer = ReportIssuer::new(
        Arc::new(UuidIdentitySource::new()),
        Arc::new(flag.clone()),
        Arc::new(SyntheticReportGenerator::new(config.report.clone())),
    );

    let state = Arc::new(AppState::new(config.clone(), issuer));

    let toggler = if config.gate.enabled {
        let state_for_callback = Arc::clone(&state);
        let on_toggle: ToggleCallback = Arc::new(move |overloaded: bool| {
            record_gate_toggle(overloaded);
            state_for_callback.record_toggle(Utc::now());
        });

        let toggler =
            OverloadToggler::from_config(flag, &config.gate).with_toggle_callback(on_toggle);
        toggler.start().await;
        Some(toggler)
    } else {
        info!("Overload gate disabled in config");
        None
    };

    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    if let Some(ref toggler) = toggler {
        toggler.stop().await;
    }

    info!("Server shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
