use anyhow::Context;
use dotenvy::dotenv;
use realty::logging::init_tracing;
use realty::metrics::{init_metrics, metrics_app};
use realty::realty_config::ServerConfig;
use realty::router::init_router;
use realty::state::init_app_state;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _log_guards = init_tracing()?;

    let state = init_app_state().await?;
    realty::realty_db::run_migrations(&state.db)
        .await
        .context("Failed to run database migrations")?;

    let mut app = init_router(state);
    if let Some(handle) = init_metrics() {
        app = app.merge(metrics_app(handle));
    }

    let server = ServerConfig::from_env();
    let listener = tokio::net::TcpListener::bind(server.address())
        .await
        .with_context(|| format!("Failed to bind {}", server.address()))?;

    info!(address = %server.address(), "Server running");
    info!("Scalar UI available at http://{}/scalar", server.address());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
