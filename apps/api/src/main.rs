mod config;
mod errors;
mod extraction;
mod improve;
mod llm_client;
mod routes;
mod state;
mod validation;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::GatewayClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    let gateway = GatewayClient::new(
        config.ai_gateway_url.clone(),
        config.ai_gateway_api_key.clone(),
        config.ai_model.clone(),
    )?;
    if config.ai_gateway_api_key.is_none() {
        warn!("AI_GATEWAY_API_KEY is not set; improvement requests will fail");
    }
    info!("AI gateway client initialized (model: {})", gateway.model());

    info!(
        min_chars = config.validation.min_chars,
        max_upload_bytes = config.max_upload_bytes,
        "Validation policy loaded"
    );

    let state = AppState {
        config: config.clone(),
        generator: Arc::new(gateway),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
