pub mod account; // Registration, sessions, profile self-service
pub mod api; // HTTP router, middleware, server lifecycle
pub mod appointment; // Appointment lifecycle state machine
pub mod authorization; // Record ownership checks
pub mod config;
pub mod core_state; // Transport-agnostic state
pub mod crypto;
pub mod dashboard; // Role-specific dashboard aggregation
pub mod db;
pub mod error;
pub mod follow_up;
pub mod identity; // Account → profile resolution
pub mod models;
pub mod prescription;

use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Startup failed: {0}")]
    Core(#[from] core_state::CoreError),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Signal handler error: {0}")]
    Signal(#[from] std::io::Error),
}

/// Run the portal until Ctrl-C.
pub async fn run() -> Result<(), StartupError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let settings = config::Settings::from_env()?;
    tracing::info!(
        db = %settings.db_path.display(),
        bind = %settings.bind_addr,
        session_ttl_hours = settings.session_ttl_hours,
        "configuration loaded"
    );

    let bind_addr = settings.bind_addr;
    let core = Arc::new(core_state::CoreState::new(settings)?);
    let server = api::start_api_server(core, bind_addr)
        .await
        .map_err(StartupError::Server)?;
    tracing::info!(addr = %server.info.server_addr, "listening");

    tokio::signal::ctrl_c().await?;
    tracing::info!("interrupt received, shutting down");
    server.stop().await;
    Ok(())
}
