// Framework bootstrap for the gateway runtime.

use crate::frameworks::config::GatewayConfig;
use crate::interface_adapters::clients::OpenAiClient;
use crate::interface_adapters::routes;
use crate::interface_adapters::state::AppState;
use std::io::{self, Result};
use std::net::SocketAddr;
use std::sync::Arc;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

// Serves the gateway on an already-bound listener.
pub async fn run(listener: tokio::net::TcpListener, config: GatewayConfig) -> Result<()> {
    let address = listener.local_addr()?;
    let state = build_state(&config)?;
    let app = routes::app(state);

    tracing::info!(%address, model = %config.model, "listening");

    // Serve app and report errors rather than panicking.
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = GatewayConfig::from_env();
    tracing::debug!(?config, "configuration loaded.");
    if config.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; generation routes will answer KEY_INVALID.");
    }

    let address = SocketAddr::new(config.host, config.port);

    // Bind TCP listener with error handling.
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener, config).await
}

fn build_state(config: &GatewayConfig) -> Result<Arc<AppState>> {
    tracing::debug!(base_url = %config.openai_base_url, "completion client configured.");
    let client = OpenAiClient::new(
        config.openai_base_url.clone(),
        config.api_key.clone(),
        config.model.clone(),
    )
    .map_err(io::Error::other)?;

    Ok(Arc::new(AppState {
        completion: Arc::new(client),
    }))
}
