use std::sync::Arc;

use api::{app, AppState, CompletionBridge, Config};
use brain_core::Brain;
use credentials::CredentialService;
use database::Database;
use gemini_brain::GeminiBrain;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;

    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    let credentials = CredentialService::new(config.jwt_secret.as_bytes(), config.token_ttl);

    let brain: Option<Arc<dyn Brain>> = match GeminiBrain::from_env() {
        Ok(brain) => {
            info!(model = %brain.config().model, "Gemini backend configured");
            Some(Arc::new(brain))
        }
        Err(e) => {
            warn!(error = %e, "Gemini backend not configured; chat replies are unavailable");
            None
        }
    };
    let bridge = CompletionBridge::new(brain, config.ai_timeout);

    let state = AppState::new(db.clone(), credentials, bridge);
    let router = app(state).layer(config.cors_layer()?);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "Adya API listening");

    axum::serve(listener, router).await?;

    db.close().await;
    Ok(())
}
