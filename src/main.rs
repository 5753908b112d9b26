use coverage_planner::adapters::inbound::{router, shutdown_on, AppState};
use coverage_planner::adapters::outbound::{init_buffered_logger, init_combined_logger, PlanarEngine};
use coverage_planner::application::{CoveragePlanningService, SERVICE_NAME, SERVICE_VERSION};
use coverage_planner::Config;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Installed without the log bridge so fast_log can own the `log` facade.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = std::env::var("COVERAGE_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let config = Config::load(Some(&config_path))?;
    info!("Configuration loaded (file: {})", config_path);

    let logger = init_combined_logger(config.logging.file.as_deref());
    let logger = init_buffered_logger(logger, config.logging.buffer_capacity);

    let engine = Arc::new(PlanarEngine::from_config(&config.planning));
    let service = CoveragePlanningService::new(engine, logger, config.planning.same_angle_tolerance);
    let app = router(AppState::new(Arc::new(service), config.server.favicon_url.clone()));

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!("{} v{} listening on {}", SERVICE_NAME, SERVICE_VERSION, listener.local_addr()?);

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_on(tokio::signal::ctrl_c()))
        .await?;

    info!("Shutting down");
    Ok(())
}
