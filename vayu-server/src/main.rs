//! HTTP entry point for the Vayu air quality service.
//!
//! Startup order matters: `.env` is loaded before the config is read,
//! and both the advisory model and the WAQI provider are optional, so
//! a bare environment still yields a serving (if degraded) process.

use std::net::SocketAddr;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use vayu_core::advisory::AdvisoryModel;
use vayu_core::provider::provider_from_config;
use vayu_core::Config;

mod error;
mod routes;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("vayu-server: .env not loaded ({e}), using the process environment");
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let model = if config.model_path.exists() {
        let model = AdvisoryModel::load(&config.model_path)?;
        tracing::info!(path = %config.model_path.display(), "advisory model loaded");
        Some(model)
    } else {
        tracing::warn!(
            path = %config.model_path.display(),
            "advisory model artifact not found, /predict will use the fallback rules"
        );
        None
    };

    let provider = provider_from_config(&config);
    if provider.is_none() {
        tracing::warn!(
            "WAQI_TOKEN not set, live endpoints will answer 500 and chat will serve placeholders"
        );
    }

    let app = routes::build_app(AppState::new(provider, model));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("vayu-server listening on {addr}");

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received, exiting");
        }
    }

    Ok(())
}
