use std::net::{IpAddr, SocketAddr};

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jobchat_api::config::AppConfig;
use jobchat_api::router::build_app_router;
use jobchat_api::state::AppState;
use jobchat_jobs::api::JobsApi;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "jobchat_api=debug,jobchat_jobs=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };
    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        job_id = %config.jobs.job_id,
        poll_interval_secs = config.jobs.poll.interval.as_secs(),
        poll_timeout_secs = config.jobs.poll.timeout.as_secs(),
        "Loaded configuration",
    );

    // --- Job service client ---
    let api = match JobsApi::new(&config.jobs.api_config()) {
        Ok(api) => api,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build job service client");
            std::process::exit(1);
        }
    };
    tracing::info!(base_url = %api.base_url(), "Job service client ready");

    let addr = match config.server.host.parse::<IpAddr>() {
        Ok(ip) => SocketAddr::new(ip, config.server.port),
        Err(e) => {
            tracing::error!(host = %config.server.host, error = %e, "Invalid HOST");
            std::process::exit(1);
        }
    };

    let state = AppState::new(&config.jobs, api);
    let shutdown = state.shutdown.clone();
    let app = build_app_router(state, &config.server);

    // --- Start server ---
    tracing::info!(%addr, "Starting server");
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "Failed to bind");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await
    {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or SIGTERM, then cancel `shutdown` so in-flight polls
/// end promptly instead of holding the server open.
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }

    shutdown.cancel();
}
