use std::error::Error;

use api::core::config::AppConfig;
use prompt_gateway::telemetry;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file when present.
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(telemetry::env_filter("info"))
        .with(telemetry::layer())
        .init();

    match dotenv {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => warn!("no .env file found, using process environment"),
        Err(e) => return Err(e.into()),
    }

    let config = AppConfig::from_env()?;
    api::start(config).await?;

    Ok(())
}
