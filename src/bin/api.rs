use anyhow::{Context, Result};
use credence::{api, app_state::AppState, config::Config, telemetry};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init();

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(?config, "starting api");

    let state = AppState::from_config(&config);
    if state.analyzer.is_none() {
        warn!(
            "{} is not set; analysis requests will return 503",
            credence::config::ENV_API_KEY
        );
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr()))?;
    info!(addr = %config.bind_addr(), "listening");

    axum::serve(listener, api::router(state)).await?;
    Ok(())
}
