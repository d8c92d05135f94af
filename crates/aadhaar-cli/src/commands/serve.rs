//! Serve command - run the HTTP extraction service.

use std::sync::Arc;

use clap::Args;
use tracing::info;

use aadhaar_core::AadhaarExtractor;

use super::config::load_config;
use crate::api;

/// Arguments for the serve command.
#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on (overrides server.bind)
    #[arg(short, long)]
    bind: Option<String>,
}

pub async fn run(args: ServeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let bind = args.bind.unwrap_or_else(|| config.server.bind.clone());

    let extractor = Arc::new(AadhaarExtractor::from_config(&config));
    let app = api::router(extractor);

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
