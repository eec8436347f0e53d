use anyhow::Context;
use dotenvy::dotenv;
use schoolhub::logging::init_tracing;
use schoolhub::metrics::{init_metrics, metrics_app, set_observability_enabled};
use schoolhub::router::init_router;
use schoolhub::state::AppState;
use schoolhub_config::{CorsConfig, DatabaseConfig, LoggingConfig, ServerConfig};
use schoolhub_db::{init_db_pool, run_migrations};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let logging_config = LoggingConfig::from_env();
    init_tracing(&logging_config)?;
    set_observability_enabled(logging_config.observability_enabled);

    let database_config = DatabaseConfig::from_env()?;
    let db = init_db_pool(&database_config)
        .await
        .context("Failed to connect to database")?;
    run_migrations(&db)
        .await
        .context("Failed to run database migrations")?;

    let server_config = ServerConfig::from_env();
    let state = AppState::new(db, CorsConfig::from_env(), server_config.clone());

    let mut app = init_router(state);
    if let Some(handle) = init_metrics()? {
        app = app.merge(metrics_app(handle));
    }

    let addr = server_config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(address = %addr, "Server running");
    info!("Swagger UI available at http://{}/swagger-ui", addr);
    info!("Scalar UI available at http://{}/scalar", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
