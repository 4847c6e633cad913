mod api;
mod middleware;
mod scheduler;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use aidrelay_alerts::AlertAggregator;
use aidrelay_drafting::{EmergencyEngine, PlatformClient};

use crate::{
    api::{build_app, AppState},
    middleware::AuthState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = aidrelay_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let locations = aidrelay_core::load_locations(&config.locations_path)?;
    tracing::info!(
        locations = locations.locations.len(),
        region_keywords = ?config.region_keywords,
        "loaded watch configuration"
    );

    let aggregator = AlertAggregator::new(&config, locations.locations)?;
    let platform = PlatformClient::new(
        &config.platform_api_url,
        config.platform_api_token.clone(),
        config.source_timeout_secs,
    )?;
    let engine = Arc::new(EmergencyEngine::new(aggregator, platform));

    let _scheduler = scheduler::build_scheduler(Arc::clone(&engine)).await?;

    let auth = AuthState::from_env(matches!(
        config.env,
        aidrelay_core::Environment::Development
    ))?;
    let app = build_app(AppState { engine }, auth);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "aidrelay server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
