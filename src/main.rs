use anyhow::Context;
use clap::Parser;
use ecomm::{api::routes::create_app, AppState, EcommConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// E-commerce REST backend
#[derive(Debug, Parser)]
#[command(name = "ecomm-server", version, about)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, env = "ECOMM_CONFIG", default_value = "ecomm.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // A missing or unusable signing secret stops the process here, before
    // anything is bound.
    let config = EcommConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let jwt_secret = config.jwt_secret()?;
    let address = config.bind_address();
    let state = AppState::build(config, &jwt_secret)
        .await
        .context("initializing application state")?;

    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {}", address))?;
    info!("ecomm-server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
    info!("shutting down");
}
