//! Shift Planner HTTP service.
//!
//! Reads configuration from the directory in `SHIFT_PLANNER_CONFIG`
//! (default `./config/default`) and serves the API with in-memory storage.

use std::env;

use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use shift_planner::api::{AppState, create_router};
use shift_planner::config::ConfigLoader;

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if env_bool("SHIFT_PLANNER_LOG_JSON", false) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config_dir =
        env::var("SHIFT_PLANNER_CONFIG").unwrap_or_else(|_| "./config/default".to_string());
    let config = ConfigLoader::load(&config_dir).inspect_err(|err| {
        error!(config_dir = %config_dir, error = %err, "Failed to load configuration");
    })?;

    let bind_address = config.server().bind_address.clone();
    info!(
        service = %config.service().name,
        environment = %config.service().environment,
        max_span_days = ?config.scheduling().max_span_days,
        default_conflict_mode = %config.scheduling().default_conflict_mode,
        closures = config.config().closures().len(),
        "Configuration loaded"
    );

    let router = create_router(AppState::in_memory(config));
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!(bind_address = %bind_address, "Shift planner listening");

    axum::serve(listener, router).await?;
    Ok(())
}
