mod cli;
mod handlers;
mod router;
mod state;

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use crate::cli::Cli;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ding_core::config::load_dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let state = Arc::new(AppState::from_cli(&cli)?);
    state.log_summary();

    let listener = tokio::net::TcpListener::bind(&cli.listen_address).await?;
    info!(address = %cli.listen_address, "ding-server listening");

    axum::serve(listener, router::build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("ding-server exited cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
