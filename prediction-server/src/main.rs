//! Prediction server entry point
//!
//! Loads the model bundle before binding: a missing or corrupt bundle
//! exits with a non-zero status and the listener is never opened.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use validator::Validate;

use prediction_server::config::{Config, LogFormat};
use prediction_server::{create_router, AppState, ModelArtifacts, ModelHandle};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Initialize logging
    init_tracing(config.log_format);

    config.validate().context("Invalid configuration")?;

    tracing::info!(
        environment = %config.environment,
        model_path = %config.model_path,
        "Prediction server starting..."
    );

    let artifacts = ModelArtifacts::load(&config.model_path).map_err(|e| {
        tracing::error!("Could not load model ({}). Server not started.", e);
        e
    })?;
    tracing::info!("Expected features: {}", artifacts.feature_count());

    let model = ModelHandle::new();
    model.install(artifacts)?;

    let state = AppState::new(model, config.clone());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?;
    tracing::info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "prediction_server=info,tower_http=info".into());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
