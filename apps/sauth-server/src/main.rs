use axum::{extract::Request, ServiceExt};
use std::net::SocketAddr;
use tracing::{error, info};

use sauth_api::{create_app, AppState};
use sauth_core::services::SessionAuthService;
use sauth_infrastructure::Repositories;
use sauth_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (.env is read here as well)
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize telemetry; the guard flushes file logs on exit
    let _log_guard = sauth_shared::telemetry::init_telemetry(&config.log)?;

    info!("{} starting ({})...", config.app.name, config.app.env);
    info!(
        "Session cookie {:?}, duration {}s",
        config.session.name, config.session.duration
    );

    // Open storage
    let repos = match Repositories::connect(&config.storage).await {
        Ok(r) => r,
        Err(e) => {
            error!("Failed to open storage: {}", e);
            std::process::exit(1);
        }
    };
    info!("Storage ready ({:?}).", config.storage.backend);

    // Create App State
    let auth = SessionAuthService::new(repos.sessions, repos.users, config.session.clone());
    let state = AppState::new(auth, config.auth.excluded_paths.clone());

    // Build app
    let app = create_app(state);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
